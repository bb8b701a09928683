use std::collections::HashSet;
use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{CoachError, CoachResult};

pub const RANKS_STR: &str = "23456789TJQKA";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
    Nine = 9,
    Ten = 10,
    Jack = 11,
    Queen = 12,
    King = 13,
    Ace = 14,
}

pub const ALL_RANKS: [Rank; 13] = [
    Rank::Two,
    Rank::Three,
    Rank::Four,
    Rank::Five,
    Rank::Six,
    Rank::Seven,
    Rank::Eight,
    Rank::Nine,
    Rank::Ten,
    Rank::Jack,
    Rank::Queen,
    Rank::King,
    Rank::Ace,
];

impl Rank {
    pub fn from_char(c: char) -> CoachResult<Rank> {
        let idx = RANKS_STR
            .find(c.to_ascii_uppercase())
            .ok_or(CoachError::InvalidRank(c))?;
        Ok(ALL_RANKS[idx])
    }

    pub fn to_char(self) -> char {
        RANKS_STR.as_bytes()[self as usize - 2] as char
    }

    pub fn value(self) -> u8 {
        self as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

pub const ALL_SUITS: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

impl Suit {
    pub fn from_char(c: char) -> CoachResult<Suit> {
        match c.to_ascii_lowercase() {
            's' => Ok(Suit::Spades),
            'h' => Ok(Suit::Hearts),
            'd' => Ok(Suit::Diamonds),
            'c' => Ok(Suit::Clubs),
            _ => Err(CoachError::InvalidSuit(c)),
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Suit::Spades => 's',
            Suit::Hearts => 'h',
            Suit::Diamonds => 'd',
            Suit::Clubs => 'c',
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Suit::Spades => "\u{2660}",
            Suit::Hearts => "\u{2665}",
            Suit::Diamonds => "\u{2666}",
            Suit::Clubs => "\u{2663}",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Card {
        Card { rank, suit }
    }

    pub fn value(&self) -> u8 {
        self.rank.value()
    }

    pub fn pretty(&self) -> String {
        format!("{}{}", self.rank.to_char(), self.suit.symbol())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.to_char(), self.suit.to_char())
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Card {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.rank
            .cmp(&other.rank)
            .then_with(|| (self.suit as u8).cmp(&(other.suit as u8)))
    }
}

/// Exactly two hole cards.
pub type HoleCards = [Card; 2];

pub fn parse_card(notation: &str) -> CoachResult<Card> {
    let notation = notation.trim();
    let chars: Vec<char> = notation.chars().collect();
    if chars.len() != 2 {
        return Err(CoachError::InvalidCardNotation(notation.to_string()));
    }
    let rank = Rank::from_char(chars[0])?;
    let suit = Suit::from_char(chars[1])?;
    Ok(Card::new(rank, suit))
}

/// Parses compact two-card notation ("AhKs") into hole cards.
pub fn parse_hand(notation: &str) -> CoachResult<HoleCards> {
    let chars: Vec<char> = notation.trim().chars().filter(|c| *c != ' ').collect();
    if chars.len() != 4 {
        return Err(CoachError::InvalidHandNotation(notation.to_string()));
    }
    let c1 = Card::new(Rank::from_char(chars[0])?, Suit::from_char(chars[1])?);
    let c2 = Card::new(Rank::from_char(chars[2])?, Suit::from_char(chars[3])?);
    if c1 == c2 {
        return Err(CoachError::DuplicateCard(c1.to_string()));
    }
    Ok([c1, c2])
}

pub fn parse_board(notation: &str) -> CoachResult<Vec<Card>> {
    let chars: Vec<char> = notation
        .trim()
        .chars()
        .filter(|c| *c != ' ' && *c != ',')
        .collect();
    if chars.len() % 2 != 0 {
        return Err(CoachError::InvalidBoardNotation(notation.to_string()));
    }
    let mut cards = Vec::new();
    let mut seen = HashSet::new();
    for pair in chars.chunks(2) {
        let card = Card::new(Rank::from_char(pair[0])?, Suit::from_char(pair[1])?);
        if !seen.insert(card) {
            return Err(CoachError::DuplicateCard(card.to_string()));
        }
        cards.push(card);
    }
    Ok(cards)
}

/// Canonical 169-class notation for two cards: "AA", "AKs", "AKo".
pub fn hand_class(cards: &HoleCards) -> String {
    let (hi, lo) = if cards[0].rank >= cards[1].rank {
        (cards[0], cards[1])
    } else {
        (cards[1], cards[0])
    };
    if hi.rank == lo.rank {
        format!("{}{}", hi.rank.to_char(), lo.rank.to_char())
    } else if hi.suit == lo.suit {
        format!("{}{}s", hi.rank.to_char(), lo.rank.to_char())
    } else {
        format!("{}{}o", hi.rank.to_char(), lo.rank.to_char())
    }
}

pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// A full deck minus the given dead cards, in canonical order.
    pub fn without(dead: &[Card]) -> Deck {
        let dead_set: HashSet<Card> = dead.iter().copied().collect();
        let cards = ALL_RANKS
            .iter()
            .flat_map(|&r| ALL_SUITS.iter().map(move |&s| Card::new(r, s)))
            .filter(|c| !dead_set.contains(c))
            .collect();
        Deck { cards }
    }

    pub fn shuffle<R: Rng>(&mut self, rng: &mut R) -> &mut Self {
        self.cards.shuffle(rng);
        self
    }

    pub fn deal(&mut self, n: usize) -> CoachResult<Vec<Card>> {
        if n > self.cards.len() {
            return Err(CoachError::NotEnoughDeck {
                requested: n,
                available: self.cards.len(),
            });
        }
        Ok(self.cards.drain(..n).collect())
    }

    pub fn deal_two(&mut self) -> CoachResult<HoleCards> {
        let cards = self.deal(2)?;
        Ok([cards[0], cards[1]])
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;

use itertools::Itertools;

use crate::cards::Card;
use crate::error::{CoachError, CoachResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum HandCategory {
    HighCard,
    OnePair,
    TwoPair,
    ThreeOfAKind,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
    RoyalFlush,
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HandCategory::HighCard => "High Card",
            HandCategory::OnePair => "One Pair",
            HandCategory::TwoPair => "Two Pair",
            HandCategory::ThreeOfAKind => "Three of a Kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full House",
            HandCategory::FourOfAKind => "Four of a Kind",
            HandCategory::StraightFlush => "Straight Flush",
            HandCategory::RoyalFlush => "Royal Flush",
        };
        write!(f, "{}", name)
    }
}

/// Best five-card holding: category first, kickers break ties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandResult {
    pub category: HandCategory,
    pub kickers: Vec<u8>,
}

impl PartialOrd for HandResult {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HandResult {
    fn cmp(&self, other: &Self) -> Ordering {
        self.category
            .cmp(&other.category)
            .then_with(|| self.kickers.cmp(&other.kickers))
    }
}

fn straight_high(values: &[u8]) -> Option<u8> {
    let unique: HashSet<u8> = values.iter().copied().collect();
    if unique.len() < 5 {
        return None;
    }
    let mut sorted: Vec<u8> = unique.iter().copied().collect();
    sorted.sort_unstable();
    if sorted[4] - sorted[0] == 4 {
        return Some(sorted[4]);
    }
    // Wheel: A-2-3-4-5
    if [14, 2, 3, 4, 5].iter().all(|v| unique.contains(v)) {
        return Some(5);
    }
    None
}

fn evaluate_five(cards: &[&Card]) -> HandResult {
    let mut values: Vec<u8> = cards.iter().map(|c| c.value()).collect();
    values.sort_unstable_by(|a, b| b.cmp(a));

    let flush = cards.windows(2).all(|w| w[0].suit == w[1].suit);
    let straight = straight_high(&values);

    if flush {
        if let Some(high) = straight {
            if high == 14 {
                return HandResult {
                    category: HandCategory::RoyalFlush,
                    kickers: vec![14],
                };
            }
            return HandResult {
                category: HandCategory::StraightFlush,
                kickers: vec![high],
            };
        }
    }

    // (count, value) pairs sorted by count desc then value desc
    let mut counts = [0u8; 15];
    for &v in &values {
        counts[v as usize] += 1;
    }
    let mut groups: Vec<(u8, u8)> = (2..=14u8)
        .filter(|&v| counts[v as usize] > 0)
        .map(|v| (counts[v as usize], v))
        .collect();
    groups.sort_unstable_by(|a, b| b.cmp(a));

    let kickers_after = |skip: &[u8]| -> Vec<u8> {
        values.iter().copied().filter(|v| !skip.contains(v)).collect()
    };

    match (groups[0].0, groups.get(1).map(|g| g.0).unwrap_or(0)) {
        (4, _) => {
            let mut kickers = vec![groups[0].1];
            kickers.extend(kickers_after(&[groups[0].1]));
            HandResult {
                category: HandCategory::FourOfAKind,
                kickers,
            }
        }
        (3, 2) => HandResult {
            category: HandCategory::FullHouse,
            kickers: vec![groups[0].1, groups[1].1],
        },
        _ if flush => HandResult {
            category: HandCategory::Flush,
            kickers: values,
        },
        _ if straight.is_some() => HandResult {
            category: HandCategory::Straight,
            kickers: vec![straight.unwrap()],
        },
        (3, _) => {
            let mut kickers = vec![groups[0].1];
            kickers.extend(kickers_after(&[groups[0].1]));
            HandResult {
                category: HandCategory::ThreeOfAKind,
                kickers,
            }
        }
        (2, 2) => {
            let mut kickers = vec![groups[0].1, groups[1].1];
            kickers.extend(kickers_after(&[groups[0].1, groups[1].1]));
            HandResult {
                category: HandCategory::TwoPair,
                kickers,
            }
        }
        (2, _) => {
            let mut kickers = vec![groups[0].1];
            kickers.extend(kickers_after(&[groups[0].1]));
            HandResult {
                category: HandCategory::OnePair,
                kickers,
            }
        }
        _ => HandResult {
            category: HandCategory::HighCard,
            kickers: values,
        },
    }
}

/// Best five-card hand over hole cards plus board (5, 6, or 7 cards total).
pub fn evaluate_hand(hole_cards: &[Card], board: &[Card]) -> CoachResult<HandResult> {
    let all: Vec<&Card> = hole_cards.iter().chain(board.iter()).collect();
    if all.len() < 5 {
        return Err(CoachError::NotEnoughCards {
            need: 5,
            got: all.len(),
        });
    }
    all.iter()
        .copied()
        .combinations(5)
        .map(|five| evaluate_five(&five))
        .max()
        .ok_or(CoachError::NotEnoughCards { need: 5, got: 0 })
}

pub fn compare_hands(hand1: &[Card], hand2: &[Card], board: &[Card]) -> CoachResult<Ordering> {
    let r1 = evaluate_hand(hand1, board)?;
    let r2 = evaluate_hand(hand2, board)?;
    Ok(r1.cmp(&r2))
}

/// Four cards to a suit, with the hero contributing at least one.
pub fn has_flush_draw(hole_cards: &[Card], board: &[Card]) -> bool {
    let mut counts = [0u32; 4];
    let mut hero = [false; 4];
    for c in hole_cards {
        counts[c.suit as usize] += 1;
        hero[c.suit as usize] = true;
    }
    for c in board {
        counts[c.suit as usize] += 1;
    }
    counts
        .iter()
        .enumerate()
        .any(|(i, &n)| n == 4 && hero[i])
}

/// Four ranks inside some five-rank window, hero contributing.
pub fn has_straight_draw(hole_cards: &[Card], board: &[Card]) -> bool {
    let mut all: HashSet<u8> = hole_cards
        .iter()
        .chain(board.iter())
        .map(|c| c.value())
        .collect();
    let hero: HashSet<u8> = hole_cards.iter().map(|c| c.value()).collect();
    // Ace plays low as well
    if all.contains(&14) {
        all.insert(1);
    }
    for start in 1u8..=10 {
        let window: Vec<u8> = (start..start + 5).filter(|v| all.contains(v)).collect();
        if window.len() >= 4
            && window
                .iter()
                .any(|v| hero.contains(v) || (*v == 1 && hero.contains(&14)))
        {
            return true;
        }
    }
    false
}

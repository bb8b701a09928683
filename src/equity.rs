use std::fmt;

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

use crate::cards::{Card, Deck, HoleCards};
use crate::error::{CoachError, CoachResult};
use crate::hand_evaluator::{
    evaluate_hand, has_flush_draw, has_straight_draw, HandCategory,
};
use crate::table::Stage;

/// Equity estimates are clamped here: the heuristic never claims a lock
/// or a dead hand.
pub const EQUITY_FLOOR: f64 = 0.1;
pub const EQUITY_CEIL: f64 = 0.9;

/// Clamped [0.1, 0.9] hand-strength estimate used as the EV input.
/// Preflop: card features scaled by table size. Postflop: made-hand
/// category plus live draws.
pub fn hand_equity(hand: &HoleCards, community: &[Card], stage: Stage, num_players: usize) -> f64 {
    let raw = if stage == Stage::Preflop || community.is_empty() {
        preflop_equity(hand, num_players)
    } else {
        postflop_equity(hand, community, stage, num_players)
    };
    raw.clamp(EQUITY_FLOOR, EQUITY_CEIL)
}

fn preflop_equity(hand: &HoleCards, num_players: usize) -> f64 {
    let (hi, lo) = {
        let a = hand[0].value() as f64;
        let b = hand[1].value() as f64;
        (a.max(b), a.min(b))
    };
    let pair = hand[0].rank == hand[1].rank;
    let suited = hand[0].suit == hand[1].suit;

    let mut score = 0.18 + 0.022 * hi + 0.014 * lo;
    if pair {
        score += 0.16 + 0.010 * (hi - 2.0);
    } else {
        let gap = hi - lo;
        score += match gap as u8 {
            1 => 0.040,
            2 => 0.020,
            3 => 0.010,
            _ => 0.0,
        };
        if suited {
            score += 0.040;
        }
        if lo >= 10.0 {
            score += 0.030;
        }
    }

    // More opponents, less equity for everyone.
    let n = num_players.clamp(2, 9) as f64;
    score * (2.0 / n).powf(0.35)
}

fn postflop_equity(hand: &HoleCards, community: &[Card], stage: Stage, num_players: usize) -> f64 {
    let Ok(result) = evaluate_hand(hand, community) else {
        return 0.5;
    };
    let mut score = match result.category {
        HandCategory::HighCard => 0.26,
        HandCategory::OnePair => pair_equity(hand, community),
        HandCategory::TwoPair => 0.63,
        HandCategory::ThreeOfAKind => 0.73,
        HandCategory::Straight => 0.78,
        HandCategory::Flush => 0.82,
        HandCategory::FullHouse => 0.88,
        HandCategory::FourOfAKind
        | HandCategory::StraightFlush
        | HandCategory::RoyalFlush => 0.95,
    };

    // Live draws only matter with cards to come.
    if stage != Stage::River {
        if has_flush_draw(hand, community) {
            score += 0.12;
        }
        if has_straight_draw(hand, community) {
            score += 0.08;
        }
    }

    score - 0.03 * (num_players.clamp(2, 9) as f64 - 2.0)
}

/// One pair graded by where the pair sits against the board.
fn pair_equity(hand: &HoleCards, community: &[Card]) -> f64 {
    let board_high = community.iter().map(|c| c.value()).max().unwrap_or(0);
    let paired_value = pair_value(hand, community);
    match paired_value {
        Some(v) if v >= board_high => 0.55, // top pair or overpair
        Some(_) => 0.42,
        None => 0.40, // pair lives entirely on the board
    }
}

fn pair_value(hand: &HoleCards, community: &[Card]) -> Option<u8> {
    if hand[0].rank == hand[1].rank {
        return Some(hand[0].value());
    }
    hand.iter()
        .filter(|h| community.iter().any(|c| c.rank == h.rank))
        .map(|h| h.value())
        .max()
}

pub struct EquityResult {
    pub win: f64,
    pub tie: f64,
    pub lose: f64,
    pub simulations: usize,
}

impl EquityResult {
    pub fn equity(&self) -> f64 {
        self.win + self.tie / 2.0
    }
}

impl fmt::Display for EquityResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Win {:.1}% | Tie {:.1}% | Lose {:.1}% (equity: {:.1}%)",
            self.win * 100.0,
            self.tie * 100.0,
            self.lose * 100.0,
            self.equity() * 100.0,
        )
    }
}

/// Monte Carlo equity against one random hand, seeded for reproducibility
/// and parallelized across simulation chunks.
pub fn equity_vs_random(
    hand: &HoleCards,
    board: &[Card],
    simulations: usize,
    seed: u64,
) -> CoachResult<EquityResult> {
    if board.len() > 5 {
        return Err(CoachError::InvalidValue(
            "board cannot exceed 5 cards".to_string(),
        ));
    }
    let mut dead: Vec<Card> = hand.to_vec();
    dead.extend_from_slice(board);
    let cards_needed = 5 - board.len();

    let results: Vec<(u64, u64, u64)> = (0..simulations.max(1))
        .into_par_iter()
        .map(|i| {
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(i as u64));
            let mut deck = Deck::without(&dead);
            deck.shuffle(&mut rng);
            let villain = deck.deal_two().expect("deck has 45+ cards");
            let runout = deck.deal(cards_needed).expect("deck has 43+ cards");
            let mut full_board = board.to_vec();
            full_board.extend(runout);

            let hero = evaluate_hand(hand, &full_board).expect("7 cards");
            let vill = evaluate_hand(&villain, &full_board).expect("7 cards");
            match hero.cmp(&vill) {
                std::cmp::Ordering::Greater => (1, 0, 0),
                std::cmp::Ordering::Equal => (0, 1, 0),
                std::cmp::Ordering::Less => (0, 0, 1),
            }
        })
        .collect();

    let (wins, ties, losses) = results
        .iter()
        .fold((0u64, 0u64, 0u64), |acc, &(w, t, l)| {
            (acc.0 + w, acc.1 + t, acc.2 + l)
        });
    let total = (wins + ties + losses) as f64;
    Ok(EquityResult {
        win: wins as f64 / total,
        tie: ties as f64 / total,
        lose: losses as f64 / total,
        simulations: total as usize,
    })
}

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::table::Action;

/// 169 starting-hand classes in rough strength order. Used as the lookup
/// spine for percentile-based chart thresholds; classes missing from the
/// ladder count as bottom of the deck.
pub const HAND_LADDER: &[&str] = &[
    "AA", "KK", "QQ", "AKs", "JJ", "AQs", "KQs", "AJs", "KJs", "TT",
    "AKo", "ATs", "QJs", "KTs", "QTs", "JTs", "99", "AQo", "A9s", "KQo",
    "K9s", "T9s", "J9s", "Q9s", "A8s", "88", "A5s", "A7s", "A4s", "A6s",
    "A3s", "K8s", "T8s", "A2s", "98s", "J8s", "77", "Q8s", "K7s", "AJo",
    "87s", "66", "K6s", "ATo", "97s", "76s", "T7s", "K5s", "55", "J7s",
    "86s", "KJo", "65s", "Q7s", "K4s", "K3s", "K2s", "96s", "44", "QJo",
    "75s", "54s", "A9o", "T6s", "KTo", "J6s", "Q6s", "33", "85s", "64s",
    "QTo", "22", "53s", "JTo", "K9o", "J9o", "T9o", "Q9o", "74s", "43s",
    "A8o", "A5o", "A7o", "A4o", "A6o", "A3o", "95s", "63s", "A2o", "52s",
    "84s", "42s", "T8o", "98o", "J8o", "Q8o", "73s", "87o", "32s", "62s",
    "97o", "76o", "K8o", "86o", "65o", "94s", "93s", "92s", "T7o", "54o",
    "83s", "75o", "82s", "K7o", "K6o", "72s", "96o", "J7o", "K5o", "T6o",
    "K4o", "K3o", "K2o", "85o", "Q7o", "64o", "53o", "J6o", "Q6o", "Q5s",
    "Q4s", "Q3s", "Q2s", "J5s", "J4s", "J3s", "J2s", "T5s", "T4s", "T3s",
    "T2s", "Q5o", "Q4o", "Q3o", "Q2o", "74o", "43o", "95o", "63o", "84o",
    "42o", "T5o", "T4o", "T3o", "T2o", "52o", "J5o", "J4o", "J3o", "J2o",
    "73o", "32o", "62o", "94o", "93o", "92o", "83o", "82o", "72o",
];

const TOTAL_COMBOS: f64 = 1326.0;

/// Combos a class notation expands to: pairs 6, suited 4, offsuit 12.
pub fn combo_count(class: &str) -> u32 {
    let chars: Vec<char> = class.chars().collect();
    match chars.len() {
        2 if chars[0] == chars[1] => 6,
        3 if chars[2] == 's' => 4,
        3 if chars[2] == 'o' => 12,
        _ => 0,
    }
}

/// Cumulative top-X% position of each class on the ladder.
static PERCENTILES: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    let mut map = HashMap::new();
    let mut running = 0u32;
    for &class in HAND_LADDER {
        running += combo_count(class);
        map.insert(class, running as f64 / TOTAL_COMBOS * 100.0);
    }
    map
});

/// The top-X% mark where a class sits: AA ~0.5, 72o = 100. Classes not on
/// the ladder count as 100.
pub fn class_percentile(class: &str) -> f64 {
    PERCENTILES.get(class).copied().unwrap_or(100.0)
}

/// All classes inside the top `pct` percent, strongest first.
pub fn classes_in_top_pct(pct: f64) -> Vec<&'static str> {
    HAND_LADDER
        .iter()
        .copied()
        .filter(|c| class_percentile(c) <= pct)
        .collect()
}

/// Relative table position derived from seat index and button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TablePosition {
    Early,
    Middle,
    Cutoff,
    Button,
    SmallBlind,
    BigBlind,
}

impl TablePosition {
    pub fn from_seat(seat: usize, button: usize, num_players: usize) -> TablePosition {
        let n = num_players.max(2);
        if n == 2 {
            // Heads-up: the button is the small blind.
            return if seat == button {
                TablePosition::SmallBlind
            } else {
                TablePosition::BigBlind
            };
        }
        let offset = (seat + n - button) % n;
        match offset {
            0 => TablePosition::Button,
            1 => TablePosition::SmallBlind,
            2 => TablePosition::BigBlind,
            o if o == n - 1 => TablePosition::Cutoff,
            3 => TablePosition::Early,
            _ => TablePosition::Middle,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TablePosition::Early => "EP",
            TablePosition::Middle => "MP",
            TablePosition::Cutoff => "CO",
            TablePosition::Button => "BTN",
            TablePosition::SmallBlind => "SB",
            TablePosition::BigBlind => "BB",
        }
    }
}

/// Top-% of hands worth opening from a position, widened slightly when
/// short-stacked (shove-or-fold pressure) and at smaller tables.
pub fn open_percent(pos: TablePosition, stack_depth: f64, num_players: usize) -> f64 {
    let base = match pos {
        TablePosition::Early => 14.0,
        TablePosition::Middle => 18.0,
        TablePosition::Cutoff => 27.0,
        TablePosition::Button => 42.0,
        TablePosition::SmallBlind => 34.0,
        TablePosition::BigBlind => 100.0,
    };
    let depth_adj = if stack_depth < 25.0 { 1.15 } else { 1.0 };
    let size_adj = 1.0 + (9.0 - num_players.min(9) as f64) * 0.03;
    (base * depth_adj * size_adj).min(100.0)
}

/// Top-% worth continuing (calling) against a raise from this position.
pub fn defend_percent(pos: TablePosition, stack_depth: f64) -> f64 {
    let base = match pos {
        TablePosition::Early | TablePosition::Middle => 9.0,
        TablePosition::Cutoff => 13.0,
        TablePosition::Button => 18.0,
        TablePosition::SmallBlind => 11.0,
        TablePosition::BigBlind => 28.0,
    };
    if stack_depth < 25.0 {
        base * 0.7
    } else {
        base
    }
}

/// Top-% worth re-raising against a raise.
pub fn reraise_percent(pos: TablePosition, stack_depth: f64) -> f64 {
    let base = match pos {
        TablePosition::Early | TablePosition::Middle => 4.0,
        TablePosition::Cutoff | TablePosition::SmallBlind => 5.5,
        TablePosition::Button => 7.0,
        TablePosition::BigBlind => 6.0,
    };
    if stack_depth < 25.0 {
        base * 1.3
    } else {
        base
    }
}

/// Base preflop recommendation for a hand class: the chart half of the
/// opponent-decision blend. `bet_ratio` is `current_bet / big_blind`, so
/// 1.0 means the pot is unopened.
pub fn preflop_advice(
    class: &str,
    pos: TablePosition,
    bet_ratio: f64,
    can_check: bool,
    stack_depth: f64,
    num_players: usize,
) -> Action {
    let pct = class_percentile(class);
    if can_check {
        // Big blind option: raise the top of the range, check the rest.
        if pct <= reraise_percent(pos, stack_depth) {
            Action::Raise
        } else {
            Action::Check
        }
    } else if bet_ratio <= 1.0 + 1e-9 {
        // Unopened pot: raise-or-fold, no limping in the chart.
        if pct <= open_percent(pos, stack_depth, num_players) {
            Action::Raise
        } else {
            Action::Fold
        }
    } else if pct <= reraise_percent(pos, stack_depth) {
        Action::Raise
    } else if pct <= defend_percent(pos, stack_depth) {
        Action::Call
    } else {
        Action::Fold
    }
}

/// Base postflop recommendation from equity alone.
pub fn postflop_advice(equity: f64, facing_bet: bool, pot_odds: f64) -> Action {
    if facing_bet {
        if equity >= 0.72 {
            Action::Raise
        } else if equity >= pot_odds {
            Action::Call
        } else {
            Action::Fold
        }
    } else if equity >= 0.60 {
        Action::Bet
    } else {
        Action::Check
    }
}

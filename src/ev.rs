use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, HoleCards};
use crate::equity::hand_equity;
use crate::table::{Action, Stage};
use crate::validator::available_actions;

/// Actions within this share of the best EV count as optimal.
const OPTIMAL_WINDOW: f64 = 0.9;

/// Estimated chance a bet takes the pot down, rising as hand strength
/// falls: weak hands are assumed to be bluffing more often.
pub fn fold_equity(equity: f64) -> f64 {
    (0.5 * (1.0 - equity)).clamp(0.10, 0.45)
}

/// Expected value of a single action, in the same units as the pot.
/// Fold is the zero baseline.
pub fn action_ev(
    action: Action,
    equity: f64,
    pot: f64,
    current_bet: f64,
    bet_size: Option<f64>,
) -> f64 {
    match action {
        Action::Fold => 0.0,
        Action::Call => (pot + current_bet) * equity - current_bet,
        Action::Check => {
            // No fold-equity term; a free card only half-realizes equity.
            if equity >= 0.5 {
                pot * equity * 0.5
            } else {
                0.0
            }
        }
        Action::Bet => {
            let amount = bet_size.unwrap_or(pot * 2.0 / 3.0).max(0.0);
            let fe = fold_equity(equity);
            fe * pot + (1.0 - fe) * ((pot + amount) * equity - amount)
        }
        Action::Raise => {
            let amount = bet_size
                .unwrap_or((current_bet * 2.5).max(pot * 0.75))
                .max(0.0);
            let fe = (fold_equity(equity) + 0.10).min(0.55);
            fe * pot + (1.0 - fe) * ((pot + amount) * equity - amount)
        }
    }
}

/// A scored decision point: every legal action with its EV, the optimal
/// set, and the best achievable EV.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub evs: Vec<(Action, f64)>,
    pub optimal: Vec<Action>,
    pub best_ev: f64,
    pub equity: f64,
}

impl Evaluation {
    /// Degraded result for numeric edge cases: every action scores zero
    /// so the caller always has a renderable, penalty-free outcome.
    fn neutral(legal: Vec<Action>) -> Evaluation {
        Evaluation {
            evs: legal.iter().map(|&a| (a, 0.0)).collect(),
            optimal: legal,
            best_ev: 0.0,
            equity: 0.5,
        }
    }

    pub fn ev_of(&self, action: Action) -> Option<f64> {
        self.evs.iter().find(|(a, _)| *a == action).map(|(_, e)| *e)
    }

    /// `max(0, best_ev - EV(chosen))`; unknown actions lose nothing.
    pub fn ev_loss(&self, chosen: Action) -> f64 {
        match self.ev_of(chosen) {
            Some(ev) => (self.best_ev - ev).max(0.0),
            None => 0.0,
        }
    }

    pub fn is_correct(&self, chosen: Action) -> bool {
        self.optimal.contains(&chosen)
    }
}

/// Scores every legal action at a decision point. Pure: identical inputs
/// always produce identical output.
#[allow(clippy::too_many_arguments)]
pub fn evaluate_spot(
    hand: Option<&HoleCards>,
    community: &[Card],
    stage: Stage,
    pot: f64,
    current_bet: f64,
    seat_bet: f64,
    stack: f64,
    big_blind: f64,
    num_players: usize,
    bet_size: Option<f64>,
) -> Evaluation {
    let facing = current_bet - seat_bet > 1e-9;
    let legal = available_actions(stage, facing, current_bet, seat_bet, stack, big_blind);

    // Edge cases degrade to a neutral result rather than erroring out.
    let Some(hand) = hand else {
        return Evaluation::neutral(legal);
    };
    if legal.is_empty() || !pot.is_finite() || pot < 0.0 {
        return Evaluation::neutral(legal);
    }

    let equity = hand_equity(hand, community, stage, num_players);
    let to_call = (current_bet - seat_bet).max(0.0);
    let evs: Vec<(Action, f64)> = legal
        .iter()
        .map(|&a| (a, action_ev(a, equity, pot, to_call, bet_size)))
        .collect();

    let best_ev = evs
        .iter()
        .map(|&(_, e)| e)
        .fold(f64::NEG_INFINITY, f64::max);

    let optimal = if best_ev > 0.0 {
        evs.iter()
            .filter(|&&(_, e)| e >= best_ev * OPTIMAL_WINDOW)
            .map(|&(a, _)| a)
            .collect()
    } else {
        // Nothing profitable: folding is the canonical optimum.
        vec![Action::Fold]
    };

    // Fold (EV 0) is always legal, so the best EV is never negative.
    Evaluation {
        evs,
        optimal,
        best_ev: best_ev.max(0.0),
        equity,
    }
}

/// Categorical quality of a decision, chess-annotation style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    BestMove,
    Correct,
    Inaccuracy,
    Mistake,
    Blunder,
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::BestMove => write!(f, "best move"),
            Label::Correct => write!(f, "correct"),
            Label::Inaccuracy => write!(f, "inaccuracy"),
            Label::Mistake => write!(f, "mistake"),
            Label::Blunder => write!(f, "blunder"),
        }
    }
}

/// Maps EV loss to a label. Membership in the optimal set decides
/// correct/incorrect; magnitude grades the rest.
pub fn classify(chosen: Action, optimal: &[Action], ev_loss: f64) -> Label {
    if optimal.contains(&chosen) {
        if ev_loss < 0.1 {
            Label::BestMove
        } else {
            Label::Correct
        }
    } else if ev_loss < 0.5 {
        Label::Inaccuracy
    } else if ev_loss < 2.0 {
        Label::Mistake
    } else {
        Label::Blunder
    }
}

use crate::table::{Action, Stage};

/// Outcome of a legality check. Illegal actions carry a reason; legal
/// bet/call sizes outside bounds come back clamped in `adjusted`.
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub legal: bool,
    pub reason: Option<String>,
    pub adjusted: Option<f64>,
}

impl Verdict {
    pub fn legal() -> Verdict {
        Verdict {
            legal: true,
            reason: None,
            adjusted: None,
        }
    }

    pub fn legal_with(size: f64) -> Verdict {
        Verdict {
            legal: true,
            reason: None,
            adjusted: Some(size),
        }
    }

    pub fn illegal(reason: impl Into<String>) -> Verdict {
        Verdict {
            legal: false,
            reason: Some(reason.into()),
            adjusted: None,
        }
    }
}

/// Pure legality and bet-size-bounds check. Never touches table state.
///
/// Sizing convention: `proposed` is the total the seat's street bet would
/// be raised *to*, not the increment. A call that exceeds the remaining
/// stack converts to an all-in call; bet and raise sizes outside bounds
/// are clamped to the nearest legal bound.
#[allow(clippy::too_many_arguments)]
pub fn validate(
    action: Action,
    stage: Stage,
    facing_bet: bool,
    current_bet: f64,
    seat_bet: f64,
    stack: f64,
    big_blind: f64,
    proposed: Option<f64>,
) -> Verdict {
    if stage == Stage::HandComplete {
        return Verdict::illegal("hand is complete");
    }
    if stack <= 0.0 && action != Action::Fold && action != Action::Check {
        return Verdict::illegal("seat is all-in");
    }

    match action {
        Action::Fold => Verdict::legal(),
        Action::Check => {
            if facing_bet || current_bet > seat_bet {
                Verdict::illegal(format!("cannot check facing a bet of {:.1}", current_bet))
            } else {
                Verdict::legal()
            }
        }
        Action::Call => {
            if current_bet <= seat_bet {
                return Verdict::illegal("nothing to call");
            }
            let owed = current_bet - seat_bet;
            // Short stack: auto-convert to an all-in call.
            Verdict::legal_with(owed.min(stack))
        }
        Action::Bet => {
            if current_bet > 0.0 {
                return Verdict::illegal("cannot bet into a bet; raise instead");
            }
            let max = stack;
            let min = big_blind.min(max);
            let size = proposed.unwrap_or(min);
            if size <= 0.0 {
                return Verdict::illegal("bet size must be positive");
            }
            Verdict::legal_with(size.clamp(min, max))
        }
        Action::Raise => {
            if current_bet <= 0.0 {
                return Verdict::illegal("nothing to raise; bet instead");
            }
            // "Double the facing bet" minimum, at least one BB on top,
            // capped at the all-in ceiling.
            let max_to = stack + seat_bet;
            if max_to <= current_bet {
                return Verdict::illegal(format!(
                    "stack too short to raise above {:.1}",
                    current_bet
                ));
            }
            let min_to = (current_bet * 2.0).max(current_bet + big_blind).min(max_to);
            let size = proposed.unwrap_or(min_to);
            if size <= 0.0 {
                return Verdict::illegal("raise size must be positive");
            }
            Verdict::legal_with(size.clamp(min_to, max_to))
        }
    }
}

/// Actions that would pass `validate` in this spot, in canonical order.
pub fn available_actions(
    stage: Stage,
    facing_bet: bool,
    current_bet: f64,
    seat_bet: f64,
    stack: f64,
    big_blind: f64,
) -> Vec<Action> {
    [
        Action::Fold,
        Action::Check,
        Action::Call,
        Action::Bet,
        Action::Raise,
    ]
    .into_iter()
    .filter(|&a| {
        validate(
            a, stage, facing_bet, current_bet, seat_bet, stack, big_blind, None,
        )
        .legal
    })
    .collect()
}

/// Canonical quick bet/raise sizes for the spot: preflop in BB steps,
/// postflop as pot fractions, always deduplicated, stack-bounded, ascending.
pub fn valid_bet_sizes(
    stage: Stage,
    pot: f64,
    current_bet: f64,
    seat_bet: f64,
    stack: f64,
    big_blind: f64,
) -> Vec<f64> {
    let all_in = stack + seat_bet;
    let mut sizes: Vec<f64> = Vec::new();

    if stage == Stage::Preflop {
        let floor = if current_bet > 0.0 {
            (current_bet * 2.0).max(current_bet + big_blind)
        } else {
            big_blind
        };
        let mut size = floor;
        while size < all_in && sizes.len() < 8 {
            sizes.push(size);
            size += big_blind;
        }
    } else if current_bet > 0.0 {
        let min_to = (current_bet * 2.0).max(current_bet + big_blind);
        for mult in [2.5, 3.0, 4.0] {
            let size = (current_bet * mult).max(min_to);
            if size < all_in {
                sizes.push(size);
            }
        }
    } else {
        for frac in [1.0 / 3.0, 0.5, 2.0 / 3.0, 1.0] {
            let size = pot * frac;
            if size >= big_blind.min(all_in) && size < all_in {
                sizes.push(size);
            }
        }
    }

    sizes.push(all_in);
    sizes.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    sizes.dedup_by(|a, b| (*a - *b).abs() < 1e-9);
    sizes.retain(|&s| s > 0.0 && s <= all_in + 1e-9);
    sizes
}

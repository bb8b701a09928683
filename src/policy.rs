use rand::Rng;

use crate::cards::hand_class;
use crate::chart::{postflop_advice, preflop_advice, TablePosition};
use crate::equity::hand_equity;
use crate::table::{Action, Stage, TableState};
use crate::validator::{valid_bet_sizes, validate};

/// A seat's behavioral leanings, all on [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Profile {
    pub name: &'static str,
    /// How wide a range the seat plays.
    pub looseness: f64,
    /// Preference for betting/raising over calling.
    pub aggression: f64,
    /// Willingness to bet with nothing.
    pub bluff_freq: f64,
}

impl Profile {
    pub const NIT: Profile = Profile {
        name: "nit",
        looseness: 0.15,
        aggression: 0.25,
        bluff_freq: 0.05,
    };
    pub const ROCK: Profile = Profile {
        name: "rock",
        looseness: 0.30,
        aggression: 0.35,
        bluff_freq: 0.10,
    };
    pub const TAG: Profile = Profile {
        name: "tag",
        looseness: 0.45,
        aggression: 0.65,
        bluff_freq: 0.20,
    };
    pub const LAG: Profile = Profile {
        name: "lag",
        looseness: 0.70,
        aggression: 0.80,
        bluff_freq: 0.35,
    };
    pub const STATION: Profile = Profile {
        name: "station",
        looseness: 0.80,
        aggression: 0.20,
        bluff_freq: 0.05,
    };
    pub const MANIAC: Profile = Profile {
        name: "maniac",
        looseness: 0.90,
        aggression: 0.95,
        bluff_freq: 0.50,
    };

    pub const PRESETS: [Profile; 6] = [
        Profile::NIT,
        Profile::ROCK,
        Profile::TAG,
        Profile::LAG,
        Profile::STATION,
        Profile::MANIAC,
    ];

    pub fn by_name(name: &str) -> Option<Profile> {
        Profile::PRESETS
            .iter()
            .copied()
            .find(|p| p.name.eq_ignore_ascii_case(name.trim()))
    }
}

impl Default for Profile {
    fn default() -> Profile {
        Profile::TAG
    }
}

/// How much a seat's decision leans on its profile versus the chart.
/// Empirically tuned; deliberately configurable rather than baked in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlendConfig {
    pub profile_weight: f64,
}

impl Default for BlendConfig {
    fn default() -> BlendConfig {
        BlendConfig {
            profile_weight: 0.7,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    pub action: Action,
    pub size: Option<f64>,
}

/// Decides a non-human seat's action. The result always passes the
/// validator for the current table state; any blended choice that would
/// not is replaced by the nearest legal fallback (check, then call, then
/// fold), so a hand can never stall on an opponent.
pub fn decide<R: Rng>(
    table: &TableState,
    seat_idx: usize,
    blend: &BlendConfig,
    rng: &mut R,
) -> Decision {
    let seat = &table.seats[seat_idx];
    let Some(hand) = seat.hole_cards else {
        return fallback(table, seat_idx);
    };

    let equity = hand_equity(&hand, &table.community, table.stage, table.num_players());
    let facing = table.facing_bet(seat_idx);
    let to_call = table.call_amount(seat_idx);
    let stack_depth = if table.big_blind > 0.0 {
        seat.stack / table.big_blind
    } else {
        100.0
    };

    let chart_action = if table.stage == Stage::Preflop {
        let pos = TablePosition::from_seat(seat_idx, table.button, table.num_players());
        preflop_advice(
            &hand_class(&hand),
            pos,
            table.current_bet / table.big_blind.max(1e-9),
            !facing,
            stack_depth,
            table.num_players(),
        )
    } else {
        let pot_odds = if to_call > 0.0 {
            to_call / (table.pot + to_call)
        } else {
            0.0
        };
        postflop_advice(equity, facing, pot_odds)
    };

    let profile_action = profile_action(seat.profile, equity, facing, rng);

    let chosen = if rng.gen::<f64>() < blend.profile_weight {
        profile_action
    } else {
        chart_action
    };
    let chosen = normalize(chosen, facing, table.current_bet > 0.0);

    let size = match chosen {
        Action::Bet | Action::Raise => pick_size(table, seat_idx, seat.profile, rng),
        _ => None,
    };

    let verdict = validate(
        chosen,
        table.stage,
        facing,
        table.current_bet,
        seat.bet,
        seat.stack,
        table.big_blind,
        size,
    );
    if verdict.legal {
        Decision {
            action: chosen,
            size: verdict.adjusted.or(size),
        }
    } else {
        fallback(table, seat_idx)
    }
}

/// The profile half of the blend: equity thresholds shifted by the
/// seat's leanings, with the RNG supplying the mixing.
fn profile_action<R: Rng>(profile: Profile, equity: f64, facing: bool, rng: &mut R) -> Action {
    let roll: f64 = rng.gen();
    if facing {
        let continue_at = 0.50 - 0.25 * profile.looseness;
        let raise_at = 0.72 - 0.15 * profile.aggression;
        if equity >= raise_at && roll < profile.aggression {
            Action::Raise
        } else if equity >= continue_at {
            Action::Call
        } else if roll < profile.bluff_freq * 0.3 {
            Action::Raise
        } else {
            Action::Fold
        }
    } else {
        let bet_at = 0.58 - 0.12 * profile.aggression;
        if equity >= bet_at || roll < profile.bluff_freq * 0.4 {
            Action::Bet
        } else {
            Action::Check
        }
    }
}

/// Coerce before validating so the blend cannot emit a category error.
/// Bet vs raise keys on whether a bet is already open: in the big-blind
/// option spot the bet is matched but still open, so aggression must
/// stay a raise. Check vs call keys on owing chips.
fn normalize(action: Action, facing: bool, bet_open: bool) -> Action {
    match action {
        Action::Bet if bet_open => Action::Raise,
        Action::Raise if !bet_open => Action::Bet,
        Action::Check if facing => Action::Call,
        Action::Call if !facing => Action::Check,
        a => a,
    }
}

/// Picks from the canonical size menu; aggressive profiles reach for the
/// bigger markers.
fn pick_size<R: Rng>(
    table: &TableState,
    seat_idx: usize,
    profile: Profile,
    rng: &mut R,
) -> Option<f64> {
    let seat = &table.seats[seat_idx];
    let sizes = valid_bet_sizes(
        table.stage,
        table.pot,
        table.current_bet,
        seat.bet,
        seat.stack,
        table.big_blind,
    );
    if sizes.is_empty() {
        return None;
    }
    let span = sizes.len() as f64;
    let skew = 0.3 + 0.5 * profile.aggression;
    let idx = ((rng.gen::<f64>() * skew + (skew - 0.3)) * span) as usize;
    Some(sizes[idx.min(sizes.len() - 1)])
}

/// Nearest safe legal action: check if possible, otherwise call
/// (validator clamps short calls to all-in), otherwise fold.
fn fallback(table: &TableState, seat_idx: usize) -> Decision {
    let seat = &table.seats[seat_idx];
    let facing = table.facing_bet(seat_idx);
    for action in [Action::Check, Action::Call, Action::Fold] {
        let verdict = validate(
            action,
            table.stage,
            facing,
            table.current_bet,
            seat.bet,
            seat.stack,
            table.big_blind,
            None,
        );
        if verdict.legal {
            return Decision {
                action,
                size: verdict.adjusted,
            };
        }
    }
    Decision {
        action: Action::Fold,
        size: None,
    }
}

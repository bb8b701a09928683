use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use log::warn;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, Deck, HoleCards};
use crate::error::{CoachError, CoachResult};
use crate::hand_evaluator::evaluate_hand;
use crate::policy::Profile;
use crate::validator::{validate, Verdict};

const EPS: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Preflop,
    Flop,
    Turn,
    River,
    HandComplete,
}

impl Stage {
    pub fn next(self) -> Stage {
        match self {
            Stage::Preflop => Stage::Flop,
            Stage::Flop => Stage::Turn,
            Stage::Turn => Stage::River,
            Stage::River | Stage::HandComplete => Stage::HandComplete,
        }
    }

    /// Community cards dealt on entry to this stage.
    pub fn cards_dealt(self) -> usize {
        match self {
            Stage::Flop => 3,
            Stage::Turn | Stage::River => 1,
            Stage::Preflop | Stage::HandComplete => 0,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Preflop => write!(f, "preflop"),
            Stage::Flop => write!(f, "flop"),
            Stage::Turn => write!(f, "turn"),
            Stage::River => write!(f, "river"),
            Stage::HandComplete => write!(f, "complete"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Fold,
    Check,
    Call,
    Bet,
    Raise,
}

pub const ALL_ACTIONS: [Action; 5] = [
    Action::Fold,
    Action::Check,
    Action::Call,
    Action::Bet,
    Action::Raise,
];

impl Action {
    pub fn is_aggressive(self) -> bool {
        matches!(self, Action::Bet | Action::Raise)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Fold => write!(f, "fold"),
            Action::Check => write!(f, "check"),
            Action::Call => write!(f, "call"),
            Action::Bet => write!(f, "bet"),
            Action::Raise => write!(f, "raise"),
        }
    }
}

impl FromStr for Action {
    type Err = CoachError;

    fn from_str(s: &str) -> CoachResult<Action> {
        match s.trim().to_lowercase().as_str() {
            "fold" | "f" => Ok(Action::Fold),
            "check" | "x" => Ok(Action::Check),
            "call" | "c" => Ok(Action::Call),
            "bet" | "b" => Ok(Action::Bet),
            "raise" | "r" => Ok(Action::Raise),
            other => Err(CoachError::InvalidValue(format!(
                "unknown action: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Seat {
    /// Remaining stack in BB units.
    pub stack: f64,
    /// Chips committed this street.
    pub bet: f64,
    pub folded: bool,
    pub all_in: bool,
    /// Acted since the last aggression this street.
    pub acted: bool,
    pub hole_cards: Option<HoleCards>,
    pub profile: Profile,
}

impl Seat {
    fn new(stack: f64, profile: Profile) -> Seat {
        Seat {
            stack,
            bet: 0.0,
            folded: false,
            all_in: false,
            acted: false,
            hole_cards: None,
            profile,
        }
    }

    /// Still contesting the pot.
    pub fn live(&self) -> bool {
        !self.folded
    }

    /// Live and able to act (not all-in).
    pub fn can_act(&self) -> bool {
        !self.folded && !self.all_in
    }
}

/// One hand's betting state. Created fresh per deal, mutated only through
/// `apply_action` and `advance_street`, discarded on the next deal.
#[derive(Debug, Clone)]
pub struct TableState {
    pub big_blind: f64,
    pub pot: f64,
    /// Max outstanding street bet among live seats.
    pub current_bet: f64,
    pub stage: Stage,
    pub community: Vec<Card>,
    pub seats: Vec<Seat>,
    pub button: usize,
    /// The single seat holding the turn; `None` once the round is closed.
    pub to_act: Option<usize>,
    pub last_aggressor: Option<usize>,
}

impl TableState {
    /// Deals a fresh hand: hole cards to every seat, blinds posted,
    /// first-to-act on the seat after the big blind.
    pub fn deal<R: Rng>(
        stacks: &[f64],
        profiles: &[Profile],
        big_blind: f64,
        button: usize,
        rng: &mut R,
    ) -> CoachResult<TableState> {
        let n = stacks.len();
        if !(2..=9).contains(&n) {
            return Err(CoachError::InvalidPlayerCount(n));
        }
        if big_blind <= 0.0 {
            return Err(CoachError::InvalidValue(
                "big blind must be positive".to_string(),
            ));
        }

        let mut seats: Vec<Seat> = stacks
            .iter()
            .enumerate()
            .map(|(i, &s)| Seat::new(s, profiles.get(i).copied().unwrap_or_default()))
            .collect();

        let mut deck = Deck::without(&[]);
        deck.shuffle(rng);
        for seat in seats.iter_mut() {
            seat.hole_cards = Some(deck.deal_two()?);
        }

        let mut table = TableState {
            big_blind,
            pot: 0.0,
            current_bet: 0.0,
            stage: Stage::Preflop,
            community: Vec::new(),
            seats,
            button: button % n,
            to_act: None,
            last_aggressor: None,
        };

        let sb = table.small_blind_seat();
        let bb = table.big_blind_seat();
        table.post_blind(sb, big_blind / 2.0);
        table.post_blind(bb, big_blind);
        table.current_bet = big_blind;
        table.to_act = table.next_actionable_after(bb);
        Ok(table)
    }

    pub fn num_players(&self) -> usize {
        self.seats.len()
    }

    /// Heads-up, the button posts the small blind.
    pub fn small_blind_seat(&self) -> usize {
        if self.num_players() == 2 {
            self.button
        } else {
            (self.button + 1) % self.num_players()
        }
    }

    pub fn big_blind_seat(&self) -> usize {
        (self.small_blind_seat() + 1) % self.num_players()
    }

    fn post_blind(&mut self, idx: usize, amount: f64) {
        let amount = amount.min(self.seats[idx].stack);
        self.commit(idx, amount);
    }

    /// Moves chips from a stack into the pot and the seat's street bet.
    fn commit(&mut self, idx: usize, amount: f64) {
        let seat = &mut self.seats[idx];
        let amount = amount.min(seat.stack);
        seat.stack -= amount;
        seat.bet += amount;
        self.pot += amount;
        if seat.stack <= EPS {
            seat.stack = 0.0;
            seat.all_in = true;
        }
    }

    pub fn live_count(&self) -> usize {
        self.seats.iter().filter(|s| s.live()).count()
    }

    pub fn facing_bet(&self, idx: usize) -> bool {
        self.current_bet - self.seats[idx].bet > EPS
    }

    /// Chips owed to call, clamped to the remaining stack.
    pub fn call_amount(&self, idx: usize) -> f64 {
        (self.current_bet - self.seats[idx].bet).max(0.0).min(self.seats[idx].stack)
    }

    /// Invariant check: `pot + sum(stacks)` is constant across transitions.
    pub fn total_chips(&self) -> f64 {
        self.pot + self.seats.iter().map(|s| s.stack).sum::<f64>()
    }

    fn next_actionable_after(&self, idx: usize) -> Option<usize> {
        let n = self.num_players();
        (1..=n)
            .map(|step| (idx + step) % n)
            .find(|&i| self.seats[i].can_act())
    }

    fn next_needing_action_after(&self, idx: usize) -> Option<usize> {
        let n = self.num_players();
        (1..=n).map(|step| (idx + step) % n).find(|&i| {
            let seat = &self.seats[i];
            seat.can_act() && (!seat.acted || self.current_bet - seat.bet > EPS)
        })
    }

    /// True once every contesting seat has matched the current bet or is
    /// all-in, and action has returned around to the last aggressor (or
    /// everyone has checked through).
    pub fn round_closed(&self) -> bool {
        if self.stage == Stage::HandComplete {
            return true;
        }
        if self.live_count() < 2 {
            return true;
        }
        self.seats
            .iter()
            .filter(|s| s.can_act())
            .all(|s| s.acted && (self.current_bet - s.bet).abs() <= EPS)
    }

    /// Validates and applies one action for the seat on turn. An illegal
    /// action returns its verdict with the state untouched.
    pub fn apply_action(&mut self, idx: usize, action: Action, size: Option<f64>) -> Verdict {
        if self.stage == Stage::HandComplete {
            return Verdict::illegal("hand is complete");
        }
        if self.to_act != Some(idx) {
            return Verdict::illegal(format!("seat {} is not on turn", idx));
        }
        let seat = &self.seats[idx];
        let verdict = validate(
            action,
            self.stage,
            self.facing_bet(idx),
            self.current_bet,
            seat.bet,
            seat.stack,
            self.big_blind,
            size,
        );
        if !verdict.legal {
            return verdict;
        }

        match action {
            Action::Fold => {
                self.seats[idx].folded = true;
                self.seats[idx].acted = true;
                if self.live_count() == 1 {
                    self.finish_uncontested();
                    return verdict;
                }
            }
            Action::Check => {
                self.seats[idx].acted = true;
            }
            Action::Call => {
                let amount = verdict.adjusted.unwrap_or(0.0);
                self.commit(idx, amount);
                self.seats[idx].acted = true;
            }
            Action::Bet | Action::Raise => {
                let total = verdict.adjusted.unwrap_or(0.0);
                let add = (total - self.seats[idx].bet).max(0.0);
                self.commit(idx, add);
                self.current_bet = self.seats[idx].bet;
                self.last_aggressor = Some(idx);
                for (i, s) in self.seats.iter_mut().enumerate() {
                    if i != idx {
                        s.acted = false;
                    }
                }
                self.seats[idx].acted = true;
            }
        }

        self.to_act = if self.round_closed() {
            None
        } else {
            self.next_needing_action_after(idx)
        };
        verdict
    }

    /// Advances to the next street once the betting round has closed.
    /// Calling while the round is open is a logged no-op, never a state
    /// corruption. Returns true when the stage changed.
    pub fn advance_street<R: Rng>(&mut self, rng: &mut R) -> bool {
        if self.stage == Stage::HandComplete {
            return false;
        }
        if !self.round_closed() {
            warn!(
                "advance_street called with the {} round still open; ignoring",
                self.stage
            );
            return false;
        }

        if self.stage == Stage::River {
            self.stage = Stage::HandComplete;
            self.to_act = None;
            self.settle_showdown();
            return true;
        }

        self.stage = self.stage.next();
        let dealt = self.deal_community(self.stage.cards_dealt(), rng);
        if !dealt {
            // Deck exhaustion is unreachable with <=9 seats; degrade to
            // ending the hand rather than corrupting the state.
            self.stage = Stage::HandComplete;
            self.to_act = None;
            self.settle_showdown();
            return true;
        }

        self.current_bet = 0.0;
        self.last_aggressor = None;
        for seat in self.seats.iter_mut() {
            seat.bet = 0.0;
            seat.acted = false;
        }
        // Postflop order starts on the first active seat after the button.
        self.to_act = self.next_actionable_after(self.button);
        true
    }

    fn deal_community<R: Rng>(&mut self, n: usize, rng: &mut R) -> bool {
        let mut dead: HashSet<Card> = self.community.iter().copied().collect();
        for seat in &self.seats {
            if let Some(cards) = seat.hole_cards {
                dead.extend(cards);
            }
        }
        let dead: Vec<Card> = dead.into_iter().collect();
        let mut deck = Deck::without(&dead);
        deck.shuffle(rng);
        match deck.deal(n) {
            Ok(cards) => {
                self.community.extend(cards);
                true
            }
            Err(_) => false,
        }
    }

    /// Everyone else folded: the last live seat takes the pot immediately.
    fn finish_uncontested(&mut self) {
        self.stage = Stage::HandComplete;
        self.to_act = None;
        if let Some(winner) = self.seats.iter().position(|s| s.live()) {
            let pot = self.pot;
            self.pot = 0.0;
            self.seats[winner].stack += pot;
        }
    }

    /// Showdown: best live hand takes the pot, ties split it evenly.
    fn settle_showdown(&mut self) {
        let mut best: Option<crate::hand_evaluator::HandResult> = None;
        let mut winners: Vec<usize> = Vec::new();
        for (i, seat) in self.seats.iter().enumerate() {
            if !seat.live() {
                continue;
            }
            let Some(cards) = seat.hole_cards else { continue };
            let Ok(result) = evaluate_hand(&cards, &self.community) else {
                continue;
            };
            match &best {
                Some(b) if result < *b => {}
                Some(b) if result == *b => winners.push(i),
                _ => {
                    best = Some(result);
                    winners = vec![i];
                }
            }
        }
        if winners.is_empty() {
            return;
        }
        let share = self.pot / winners.len() as f64;
        self.pot = 0.0;
        for &w in &winners {
            self.seats[w].stack += share;
        }
    }
}

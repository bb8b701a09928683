use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::cards::{Card, HoleCards};
use crate::chart::TablePosition;
use crate::error::{CoachError, CoachResult};
use crate::ev::{classify, evaluate_spot, Evaluation, Label};
use crate::policy::{decide, BlendConfig, Profile};
use crate::records::{DecisionRecord, RecordStore};
use crate::table::{Action, Stage, TableState};
use crate::validator::{available_actions, valid_bet_sizes, Verdict};

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub num_players: usize,
    /// Starting stack in BB units.
    pub starting_stack: f64,
    pub big_blind: f64,
    pub hero_seat: usize,
    pub seed: Option<u64>,
    pub blend: BlendConfig,
    /// Cycled across the non-hero seats.
    pub profiles: Vec<Profile>,
}

impl Default for SessionConfig {
    fn default() -> SessionConfig {
        SessionConfig {
            num_players: 6,
            starting_stack: 100.0,
            big_blind: 1.0,
            hero_seat: 0,
            seed: None,
            blend: BlendConfig::default(),
            profiles: Profile::PRESETS.to_vec(),
        }
    }
}

/// Scoring feedback for the hero's most recent decision.
#[derive(Debug, Clone)]
pub struct Feedback {
    pub action: Action,
    pub bet_size: Option<f64>,
    pub optimal: Vec<Action>,
    pub ev_loss: f64,
    pub is_correct: bool,
    pub label: Label,
    pub equity: f64,
}

/// The derived view handed to a UI layer after every transition.
#[derive(Debug, Clone)]
pub struct TableView {
    pub stage: Stage,
    pub pot: f64,
    pub current_bet: f64,
    pub community: Vec<Card>,
    pub hero_hand: Option<HoleCards>,
    pub hero_turn: bool,
    pub stacks: Vec<f64>,
    pub available_actions: Vec<Action>,
    pub quick_bet_sizes: Vec<f64>,
    pub feedback: Option<Feedback>,
}

/// One training session: owns the table, the seeded RNG, and the record
/// store. All betting flows through here, one hand at a time.
pub struct Session {
    config: SessionConfig,
    rng: StdRng,
    table: Option<TableState>,
    records: RecordStore,
    button: usize,
    hands_dealt: u64,
    hand_id: String,
    /// Bet/raise selected but not yet sized; nothing is mutated until
    /// the size is confirmed.
    pending: Option<Action>,
    feedback: Option<Feedback>,
}

impl Session {
    pub fn new(config: SessionConfig) -> CoachResult<Session> {
        if !(2..=9).contains(&config.num_players) {
            return Err(CoachError::InvalidPlayerCount(config.num_players));
        }
        if config.hero_seat >= config.num_players {
            return Err(CoachError::NoSuchSeat(config.hero_seat));
        }
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Session {
            button: config.num_players - 1,
            config,
            rng,
            table: None,
            records: RecordStore::new(),
            hands_dealt: 0,
            hand_id: String::new(),
            pending: None,
            feedback: None,
        })
    }

    pub fn table(&self) -> Option<&TableState> {
        self.table.as_ref()
    }

    pub fn records(&self) -> &RecordStore {
        &self.records
    }

    pub fn records_mut(&mut self) -> &mut RecordStore {
        &mut self.records
    }

    pub fn hero_seat(&self) -> usize {
        self.config.hero_seat
    }

    pub fn last_feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    /// Deals the next hand. Never happens implicitly: a completed hand
    /// stays on the table until this is called. Stacks carry over;
    /// busted seats re-buy to the starting stack.
    pub fn deal_new_hand(&mut self) -> CoachResult<()> {
        let stacks: Vec<f64> = match &self.table {
            Some(t) => t
                .seats
                .iter()
                .map(|s| {
                    if s.stack < self.config.big_blind {
                        self.config.starting_stack
                    } else {
                        s.stack
                    }
                })
                .collect(),
            None => vec![self.config.starting_stack; self.config.num_players],
        };
        let profiles: Vec<Profile> = (0..self.config.num_players)
            .map(|i| match self.config.profiles.len() {
                0 => Profile::default(),
                n => self.config.profiles[i % n],
            })
            .collect();

        if self.hands_dealt > 0 {
            self.button = (self.button + 1) % self.config.num_players;
        }
        self.hands_dealt += 1;
        self.hand_id = format!("hand-{:04}", self.hands_dealt);
        self.pending = None;
        self.feedback = None;

        let table = TableState::deal(
            &stacks,
            &profiles,
            self.config.big_blind,
            self.button,
            &mut self.rng,
        )?;
        self.table = Some(table);
        self.run_table();
        Ok(())
    }

    /// UI intent: choose an action. Fold/check/call commit immediately;
    /// bet/raise are held pending until `confirm_bet_size`.
    pub fn select_action(&mut self, action: Action) -> Verdict {
        let Some(table) = &self.table else {
            return Verdict::illegal("no hand in progress");
        };
        let hero = self.config.hero_seat;
        if table.to_act != Some(hero) {
            return Verdict::illegal("not the hero's turn");
        }
        if action.is_aggressive() {
            // Pre-check with no size so an impossible bet/raise is
            // rejected before the sizing step.
            let seat = &table.seats[hero];
            let verdict = crate::validator::validate(
                action,
                table.stage,
                table.facing_bet(hero),
                table.current_bet,
                seat.bet,
                seat.stack,
                table.big_blind,
                None,
            );
            if verdict.legal {
                self.pending = Some(action);
            }
            return verdict;
        }
        self.commit_hero(action, None)
    }

    /// UI intent: size the pending bet/raise and commit it.
    pub fn confirm_bet_size(&mut self, size: f64) -> Verdict {
        let Some(action) = self.pending.take() else {
            return Verdict::illegal("no bet awaiting a size");
        };
        self.commit_hero(action, Some(size))
    }

    /// Aborts a pending bet-size selection; the table is untouched.
    pub fn cancel_bet_size(&mut self) {
        self.pending = None;
    }

    /// UI intent kept for parity: a no-op while the round is open (the
    /// engine advances streets itself once betting closes).
    pub fn advance_street(&mut self) -> bool {
        let Some(table) = &mut self.table else {
            return false;
        };
        let advanced = table.advance_street(&mut self.rng);
        if advanced {
            self.run_table();
        }
        advanced
    }

    fn commit_hero(&mut self, action: Action, size: Option<f64>) -> Verdict {
        let hero = self.config.hero_seat;
        let Some(table) = &mut self.table else {
            return Verdict::illegal("no hand in progress");
        };

        // Score the spot against the pre-action state.
        let seat = &table.seats[hero];
        let evaluation = evaluate_spot(
            seat.hole_cards.as_ref(),
            &table.community,
            table.stage,
            table.pot,
            table.current_bet,
            seat.bet,
            seat.stack,
            table.big_blind,
            table.num_players(),
            size,
        );
        let snapshot = (
            table.stage,
            table.pot,
            table.current_bet,
            seat.stack,
            table.community.clone(),
            seat.hole_cards,
        );

        let verdict = table.apply_action(hero, action, size);
        if !verdict.legal {
            return verdict;
        }

        self.score_and_record(action, verdict.adjusted.or(size), &evaluation, snapshot);
        self.run_table();
        verdict
    }

    #[allow(clippy::type_complexity)]
    fn score_and_record(
        &mut self,
        action: Action,
        size: Option<f64>,
        evaluation: &Evaluation,
        snapshot: (Stage, f64, f64, f64, Vec<Card>, Option<HoleCards>),
    ) {
        let (stage, pot, current_bet, stack, community, hole_cards) = snapshot;
        let ev_loss = evaluation.ev_loss(action);
        let is_correct = evaluation.is_correct(action);
        let label = classify(action, &evaluation.optimal, ev_loss);

        self.feedback = Some(Feedback {
            action,
            bet_size: size,
            optimal: evaluation.optimal.clone(),
            ev_loss,
            is_correct,
            label,
            equity: evaluation.equity,
        });

        let Some(player_hand) = hole_cards else {
            return;
        };
        let position = TablePosition::from_seat(
            self.config.hero_seat,
            self.button,
            self.config.num_players,
        );
        self.records.add(DecisionRecord {
            hand_id: self.hand_id.clone(),
            player_hand,
            position: position.label().to_string(),
            num_players: self.config.num_players,
            stage,
            community_cards: community,
            pot,
            current_bet,
            stack,
            action,
            bet_size: size,
            optimal_actions: evaluation.optimal.clone(),
            ev_loss,
            label: Some(label),
            is_correct,
            features: None,
        });
    }

    /// Runs opponents in positional order and advances streets as rounds
    /// close, until the hero holds the turn or the hand completes.
    fn run_table(&mut self) {
        let hero = self.config.hero_seat;
        let blend = self.config.blend;
        // Bounded by seats x streets; the guard only protects against a
        // policy bug looping a street.
        for _ in 0..256 {
            let Some(table) = &mut self.table else { return };
            if table.stage == Stage::HandComplete {
                return;
            }
            match table.to_act {
                Some(idx) if idx == hero => return,
                Some(idx) => {
                    let decision = decide(table, idx, &blend, &mut self.rng);
                    let verdict = table.apply_action(idx, decision.action, decision.size);
                    if !verdict.legal {
                        // Policy guarantees legality; fold as a last resort
                        // so the hand cannot stall.
                        table.apply_action(idx, Action::Fold, None);
                    }
                }
                None => {
                    if !table.advance_street(&mut self.rng) {
                        return;
                    }
                }
            }
        }
    }

    /// The derived view a UI renders from.
    pub fn view(&self) -> TableView {
        let Some(table) = &self.table else {
            return TableView {
                stage: Stage::HandComplete,
                pot: 0.0,
                current_bet: 0.0,
                community: Vec::new(),
                hero_hand: None,
                hero_turn: false,
                stacks: Vec::new(),
                available_actions: Vec::new(),
                quick_bet_sizes: Vec::new(),
                feedback: self.feedback.clone(),
            };
        };
        let hero = self.config.hero_seat;
        let hero_turn = table.to_act == Some(hero);
        let seat = &table.seats[hero];
        let (actions, sizes) = if hero_turn {
            (
                available_actions(
                    table.stage,
                    table.facing_bet(hero),
                    table.current_bet,
                    seat.bet,
                    seat.stack,
                    table.big_blind,
                ),
                valid_bet_sizes(
                    table.stage,
                    table.pot,
                    table.current_bet,
                    seat.bet,
                    seat.stack,
                    table.big_blind,
                ),
            )
        } else {
            (Vec::new(), Vec::new())
        };
        TableView {
            stage: table.stage,
            pot: table.pot,
            current_bet: table.current_bet,
            community: table.community.clone(),
            hero_hand: seat.hole_cards,
            hero_turn,
            stacks: table.seats.iter().map(|s| s.stack).collect(),
            available_actions: actions,
            quick_bet_sizes: sizes,
            feedback: self.feedback.clone(),
        }
    }
}

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;

use crate::cards::{parse_board, parse_hand};
use crate::display::{board_display, ev_table, print_error, sizes_display, styled_action};
use crate::equity::equity_vs_random;
use crate::ev::evaluate_spot;
use crate::play::{play_command, PlayOptions};
use crate::records::RecordStore;
use crate::table::{Action, Stage};
use crate::validator::{valid_bet_sizes, validate};

#[derive(Parser)]
#[command(
    name = "coach",
    version,
    about = "Hold'em trainer \u{2014} play scored hands against chart-driven opponents."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum StageArg {
    Preflop,
    Flop,
    Turn,
    River,
}

impl From<StageArg> for Stage {
    fn from(value: StageArg) -> Stage {
        match value {
            StageArg::Preflop => Stage::Preflop,
            StageArg::Flop => Stage::Flop,
            StageArg::Turn => Stage::Turn,
            StageArg::River => Stage::River,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ActionArg {
    Fold,
    Check,
    Call,
    Bet,
    Raise,
}

impl From<ActionArg> for Action {
    fn from(value: ActionArg) -> Action {
        match value {
            ActionArg::Fold => Action::Fold,
            ActionArg::Check => Action::Check,
            ActionArg::Call => Action::Call,
            ActionArg::Bet => Action::Bet,
            ActionArg::Raise => Action::Raise,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive training session: every decision gets scored
    Play {
        /// Seats at the table (2-9)
        #[arg(short, long, default_value = "6")]
        players: usize,
        /// Starting stacks in big blinds
        #[arg(long, default_value = "100")]
        stack: f64,
        /// RNG seed for a reproducible session
        #[arg(long)]
        seed: Option<u64>,
        /// Profile share of the opponent decision blend (0-1)
        #[arg(long, default_value = "0.7")]
        profile_weight: f64,
        /// Single opponent profile (nit/rock/tag/lag/station/maniac)
        #[arg(long)]
        villain: Option<String>,
        /// Write the session's decision records to a JSON file
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// Score one decision point: EV of every legal action
    Ev {
        /// Hero hand, e.g. AhKs
        hand: String,
        /// Board cards, e.g. Ks7d2c (omit for preflop)
        #[arg(short, long)]
        board: Option<String>,
        #[arg(long, default_value = "6")]
        pot: f64,
        /// Outstanding bet to match (bb)
        #[arg(long, default_value = "0")]
        bet: f64,
        #[arg(long, default_value = "100")]
        stack: f64,
        #[arg(short, long, default_value = "2")]
        players: usize,
        /// Proposed bet/raise size for the aggressive lines
        #[arg(long)]
        size: Option<f64>,
    },
    /// Check whether an action is legal in a spot
    Check {
        #[arg(value_enum)]
        action: ActionArg,
        #[arg(value_enum, default_value = "flop")]
        stage: StageArg,
        /// Outstanding bet to match (bb)
        #[arg(long, default_value = "0")]
        bet: f64,
        /// Hero chips already in this street (bb)
        #[arg(long, default_value = "0")]
        committed: f64,
        #[arg(long, default_value = "100")]
        stack: f64,
        #[arg(long)]
        size: Option<f64>,
    },
    /// Canonical quick bet sizes for a spot
    Sizes {
        #[arg(value_enum)]
        stage: StageArg,
        #[arg(long, default_value = "10")]
        pot: f64,
        #[arg(long, default_value = "0")]
        bet: f64,
        #[arg(long, default_value = "100")]
        stack: f64,
    },
    /// Monte Carlo equity vs one random hand
    Equity {
        /// Hero hand, e.g. AhKs
        hand: String,
        #[arg(short, long)]
        board: Option<String>,
        #[arg(long, default_value = "20000")]
        sims: usize,
        #[arg(long, default_value = "1")]
        seed: u64,
    },
    /// Validate and summarize a decision-record JSON file
    Import {
        file: PathBuf,
    },
}

pub fn run() {
    let cli = Cli::parse();
    if let Err(e) = dispatch(cli) {
        print_error(&e.to_string());
        std::process::exit(1);
    }
}

fn dispatch(cli: Cli) -> crate::error::CoachResult<()> {
    match cli.command {
        Commands::Play {
            players,
            stack,
            seed,
            profile_weight,
            villain,
            export,
        } => play_command(PlayOptions {
            players,
            stack,
            seed,
            profile_weight: profile_weight.clamp(0.0, 1.0),
            villain,
            export,
        }),
        Commands::Ev {
            hand,
            board,
            pot,
            bet,
            stack,
            players,
            size,
        } => cmd_ev(&hand, board.as_deref(), pot, bet, stack, players, size),
        Commands::Check {
            action,
            stage,
            bet,
            committed,
            stack,
            size,
        } => {
            cmd_check(action.into(), stage.into(), bet, committed, stack, size);
            Ok(())
        }
        Commands::Sizes {
            stage,
            pot,
            bet,
            stack,
        } => {
            let sizes = valid_bet_sizes(stage.into(), pot, bet, 0.0, stack, 1.0);
            println!("  {}", sizes_display(&sizes));
            Ok(())
        }
        Commands::Equity {
            hand,
            board,
            sims,
            seed,
        } => cmd_equity(&hand, board.as_deref(), sims, seed),
        Commands::Import { file } => cmd_import(&file),
    }
}

fn cmd_ev(
    hand: &str,
    board: Option<&str>,
    pot: f64,
    bet: f64,
    stack: f64,
    players: usize,
    size: Option<f64>,
) -> crate::error::CoachResult<()> {
    let hand = parse_hand(hand)?;
    let board = match board {
        Some(b) => parse_board(b)?,
        None => Vec::new(),
    };
    let stage = match board.len() {
        0 => Stage::Preflop,
        3 => Stage::Flop,
        4 => Stage::Turn,
        5 => Stage::River,
        n => {
            return Err(crate::error::CoachError::InvalidValue(format!(
                "board must have 0/3/4/5 cards, got {}",
                n
            )))
        }
    };

    let evaluation = evaluate_spot(
        Some(&hand),
        &board,
        stage,
        pot,
        bet,
        0.0,
        stack,
        1.0,
        players,
        size,
    );
    if !board.is_empty() {
        println!("  Board: {}", board_display(&board));
    }
    println!("  Equity estimate: {:.1}%", evaluation.equity * 100.0);
    println!("{}", ev_table(&evaluation));
    Ok(())
}

fn cmd_check(
    action: Action,
    stage: Stage,
    bet: f64,
    committed: f64,
    stack: f64,
    size: Option<f64>,
) {
    let verdict = validate(
        action,
        stage,
        bet > committed,
        bet,
        committed,
        stack,
        1.0,
        size,
    );
    if verdict.legal {
        match verdict.adjusted {
            Some(adj) => println!(
                "  {} {} ({}bb)",
                styled_action(action),
                "legal".green(),
                format!("{:.1}", adj)
            ),
            None => println!("  {} {}", styled_action(action), "legal".green()),
        }
    } else {
        println!(
            "  {} {} \u{2014} {}",
            styled_action(action),
            "illegal".red(),
            verdict.reason.unwrap_or_default()
        );
    }
}

fn cmd_equity(
    hand: &str,
    board: Option<&str>,
    sims: usize,
    seed: u64,
) -> crate::error::CoachResult<()> {
    let hand = parse_hand(hand)?;
    let board = match board {
        Some(b) => parse_board(b)?,
        None => Vec::new(),
    };
    let result = equity_vs_random(&hand, &board, sims, seed)?;
    println!("  {}", result);
    Ok(())
}

fn cmd_import(file: &PathBuf) -> crate::error::CoachResult<()> {
    let json = std::fs::read_to_string(file)?;
    let mut store = RecordStore::new();
    let n = store.import_json(&json)?;
    let correct = store.records().iter().filter(|r| r.is_correct).count();
    let total_loss: f64 = store.records().iter().map(|r| r.ev_loss).sum();
    println!(
        "  {} records ({} correct, {:.2}bb total EV loss)",
        n, correct, total_loss
    );
    Ok(())
}

use colored::Colorize;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};

use crate::cards::{Card, Suit};
use crate::ev::{Evaluation, Label};
use crate::table::Action;

pub fn board_display(cards: &[Card]) -> String {
    cards
        .iter()
        .map(|card| {
            let text = format!("{}{}", card.rank.to_char(), card.suit.symbol());
            match card.suit {
                Suit::Spades => text.white().to_string(),
                Suit::Hearts => text.red().to_string(),
                Suit::Diamonds => text.blue().to_string(),
                Suit::Clubs => text.green().to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn equity_bar(equity: f64, width: usize) -> String {
    let filled = ((equity * width as f64) as usize).min(width);
    let bar: String = "\u{2588}".repeat(filled) + &"\u{2591}".repeat(width - filled);
    let pct = format!("{:.1}%", equity * 100.0);
    if equity >= 0.6 {
        format!("{} {}", bar.green(), pct)
    } else if equity >= 0.4 {
        format!("{} {}", bar.yellow(), pct)
    } else {
        format!("{} {}", bar.red(), pct)
    }
}

pub fn styled_action(action: Action) -> String {
    let text = action.to_string().to_uppercase();
    match action {
        Action::Bet | Action::Raise => text.red().bold().to_string(),
        Action::Call => text.green().bold().to_string(),
        Action::Check => text.yellow().bold().to_string(),
        Action::Fold => text.dimmed().bold().to_string(),
    }
}

pub fn styled_label(label: Label) -> String {
    let text = label.to_string();
    match label {
        Label::BestMove => text.green().bold().to_string(),
        Label::Correct => text.green().to_string(),
        Label::Inaccuracy => text.yellow().to_string(),
        Label::Mistake => text.red().to_string(),
        Label::Blunder => text.red().bold().to_string(),
    }
}

/// EV breakdown table for a scored decision point.
pub fn ev_table(evaluation: &Evaluation) -> String {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Action"),
        Cell::new("EV (bb)").set_alignment(CellAlignment::Right),
        Cell::new("Optimal").set_alignment(CellAlignment::Center),
    ]);
    for &(action, ev) in &evaluation.evs {
        let ev_str = if ev >= 0.0 {
            format!("{:+.2}", ev).green().to_string()
        } else {
            format!("{:+.2}", ev).red().to_string()
        };
        let mark = if evaluation.optimal.contains(&action) {
            "\u{2713}".green().to_string()
        } else {
            String::new()
        };
        table.add_row(vec![
            Cell::new(styled_action(action)),
            Cell::new(ev_str).set_alignment(CellAlignment::Right),
            Cell::new(mark).set_alignment(CellAlignment::Center),
        ]);
    }
    table.to_string()
}

pub fn sizes_display(sizes: &[f64]) -> String {
    sizes
        .iter()
        .map(|s| format!("{:.1}", s))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "Error:".red().bold(), msg);
}

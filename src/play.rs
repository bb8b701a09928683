use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;

use colored::Colorize;

use crate::cards::hand_class;
use crate::display::{board_display, equity_bar, sizes_display, styled_action, styled_label};
use crate::error::CoachResult;
use crate::policy::{BlendConfig, Profile};
use crate::session::{Session, SessionConfig, TableView};
use crate::table::{Action, Stage};

pub struct PlayOptions {
    pub players: usize,
    pub stack: f64,
    pub seed: Option<u64>,
    pub profile_weight: f64,
    pub villain: Option<String>,
    pub export: Option<PathBuf>,
}

impl Default for PlayOptions {
    fn default() -> PlayOptions {
        PlayOptions {
            players: 6,
            stack: 100.0,
            seed: None,
            profile_weight: 0.7,
            villain: None,
            export: None,
        }
    }
}

pub fn play_command(opts: PlayOptions) -> CoachResult<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut reader = stdin.lock();
    let mut writer = stdout.lock();
    run_interactive_session(opts, &mut reader, &mut writer)
}

fn prompt(
    message: &str,
    default: Option<&str>,
    reader: &mut dyn BufRead,
    writer: &mut dyn Write,
) -> String {
    if let Some(d) = default {
        write!(writer, "{} [{}]: ", message, d).ok();
    } else {
        write!(writer, "{}: ", message).ok();
    }
    writer.flush().ok();

    let mut line = String::new();
    match reader.read_line(&mut line) {
        Ok(0) | Err(_) => "q".to_string(),
        Ok(_) => {
            let trimmed = line.trim().to_string();
            if trimmed.is_empty() {
                default.unwrap_or("").to_string()
            } else {
                trimmed
            }
        }
    }
}

fn prompt_yn(
    message: &str,
    default: &str,
    reader: &mut dyn BufRead,
    writer: &mut dyn Write,
) -> Option<bool> {
    let answer = prompt(&format!("{} (y/n)", message), Some(default), reader, writer);
    if answer.eq_ignore_ascii_case("q") {
        return None;
    }
    Some(matches!(answer.to_lowercase().as_str(), "y" | "yes"))
}

pub fn run_interactive_session(
    opts: PlayOptions,
    reader: &mut dyn BufRead,
    writer: &mut dyn Write,
) -> CoachResult<()> {
    writeln!(writer).ok();
    writeln!(
        writer,
        "{}",
        "Coach \u{2014} play hands, get every decision scored.".cyan().bold()
    )
    .ok();
    writeln!(
        writer,
        "Type {} at any prompt to quit. Stacks in big blinds.\n",
        "'q'".bold()
    )
    .ok();

    let profiles = match opts.villain.as_deref().and_then(Profile::by_name) {
        Some(p) => vec![p],
        None => Profile::PRESETS.to_vec(),
    };
    let mut session = Session::new(SessionConfig {
        num_players: opts.players,
        starting_stack: opts.stack,
        big_blind: 1.0,
        hero_seat: 0,
        seed: opts.seed,
        blend: BlendConfig {
            profile_weight: opts.profile_weight,
        },
        profiles,
    })?;

    loop {
        session.deal_new_hand()?;
        if !play_one_hand(&mut session, reader, writer) {
            break;
        }
        match prompt_yn("\nPlay another hand?", "y", reader, writer) {
            Some(true) => continue,
            _ => break,
        }
    }

    if let Some(path) = &opts.export {
        let json = session.records().export_json()?;
        std::fs::write(path, json)?;
        writeln!(
            writer,
            "\n{} {} records to {}",
            "Exported".green().bold(),
            session.records().len(),
            path.display()
        )
        .ok();
    }
    writeln!(writer, "\n{}\n", "Session over. Review your blunders.".cyan().bold()).ok();
    Ok(())
}

/// Returns false when the user quit mid-hand.
fn play_one_hand(
    session: &mut Session,
    reader: &mut dyn BufRead,
    writer: &mut dyn Write,
) -> bool {
    let mut last_stage = None;
    loop {
        let view = session.view();
        if view.stage == Stage::HandComplete {
            render_feedback(&view, writer);
            writeln!(writer, "\n{}", "--- Hand Complete ---".cyan().bold()).ok();
            writeln!(
                writer,
                "  Stacks: {}",
                view.stacks
                    .iter()
                    .map(|s| format!("{:.1}", s))
                    .collect::<Vec<_>>()
                    .join(" / ")
            )
            .ok();
            return true;
        }
        if !view.hero_turn {
            // Hero folded earlier; the engine has already run the hand out.
            return true;
        }

        if last_stage != Some(view.stage) {
            render_street_header(&view, writer);
            last_stage = Some(view.stage);
        }
        render_feedback(&view, writer);
        render_spot(&view, writer);

        let options: Vec<String> = view
            .available_actions
            .iter()
            .map(|a| a.to_string())
            .collect();
        let answer = prompt(
            &format!("  Action ({})", options.join("/")),
            None,
            reader,
            writer,
        );
        if answer.eq_ignore_ascii_case("q") {
            return false;
        }
        let Ok(action) = Action::from_str(&answer) else {
            writeln!(writer, "  {}", "Unknown action.".red()).ok();
            continue;
        };

        let verdict = session.select_action(action);
        if !verdict.legal {
            writeln!(
                writer,
                "  {}",
                verdict.reason.unwrap_or_default().red()
            )
            .ok();
            continue;
        }
        if action.is_aggressive() {
            if !confirm_size(session, reader, writer) {
                return false;
            }
        }
    }
}

/// Sizing loop for a pending bet/raise. Returns false on quit.
fn confirm_size(
    session: &mut Session,
    reader: &mut dyn BufRead,
    writer: &mut dyn Write,
) -> bool {
    loop {
        let view = session.view();
        writeln!(
            writer,
            "  Quick sizes: {}",
            sizes_display(&view.quick_bet_sizes).dimmed()
        )
        .ok();
        let answer = prompt("  Size in bb ('c' to cancel)", None, reader, writer);
        if answer.eq_ignore_ascii_case("q") {
            session.cancel_bet_size();
            return false;
        }
        if answer.eq_ignore_ascii_case("c") {
            session.cancel_bet_size();
            writeln!(writer, "  {}", "Cancelled.".dimmed()).ok();
            return true;
        }
        let Ok(size) = answer.parse::<f64>() else {
            writeln!(writer, "  {}", "Enter a number.".red()).ok();
            continue;
        };
        let verdict = session.confirm_bet_size(size);
        if verdict.legal {
            if let Some(adjusted) = verdict.adjusted {
                if (adjusted - size).abs() > 1e-9 {
                    writeln!(
                        writer,
                        "  {}",
                        format!("Size adjusted to {:.1}bb.", adjusted).yellow()
                    )
                    .ok();
                }
            }
            return true;
        }
        writeln!(writer, "  {}", verdict.reason.unwrap_or_default().red()).ok();
        return true;
    }
}

fn render_street_header(view: &TableView, writer: &mut dyn Write) {
    let title = format!("--- {} ---", capitalize(&view.stage.to_string()));
    writeln!(writer, "\n{}", title.cyan().bold()).ok();
    if let Some(hand) = view.hero_hand {
        let pretty: String = hand.iter().map(|c| c.pretty()).collect();
        writeln!(
            writer,
            "  Hand: {} ({})",
            pretty.bold(),
            hand_class(&hand).dimmed()
        )
        .ok();
    }
}

fn render_spot(view: &TableView, writer: &mut dyn Write) {
    let board = if view.community.is_empty() {
        "\u{2014}".to_string()
    } else {
        board_display(&view.community)
    };
    writeln!(
        writer,
        "  Board: {}  |  Pot: {:.1}bb  |  To match: {:.1}bb",
        board, view.pot, view.current_bet
    )
    .ok();
}

fn render_feedback(view: &TableView, writer: &mut dyn Write) {
    let Some(fb) = &view.feedback else { return };
    let optimal: Vec<String> = fb.optimal.iter().map(|&a| styled_action(a)).collect();
    writeln!(
        writer,
        "  {} {}  (EV loss {:.2}bb, optimal: {})",
        "Last:".bold(),
        styled_label(fb.label),
        fb.ev_loss,
        optimal.join("/")
    )
    .ok();
    writeln!(writer, "  Equity: {}", equity_bar(fb.equity, 24)).ok();
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

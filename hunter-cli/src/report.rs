use anyhow::Result;
use colored::Colorize;
use hunter_game::{Command, SessionStatus, SessionSummary};
use serde::Serialize;
use std::io::Write;

use crate::autoplay::AutoplayStrategy;

/// One applied command and what the player saw afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnLog {
    pub turn: u32,
    pub command: Command,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departure: Option<String>,
    pub news: String,
    pub gold: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub strategy: AutoplayStrategy,
    pub max_turns: u32,
    pub summary: SessionSummary,
    pub turns: Vec<TurnLog>,
}

impl RunReport {
    /// True when the run stopped because of the turn limit.
    #[must_use]
    pub fn hit_turn_limit(&self) -> bool {
        self.summary.status == SessionStatus::Playing
    }
}

pub fn generate_json_report(out: &mut dyn Write, report: &RunReport) -> Result<()> {
    let json_output = serde_json::to_string_pretty(report)?;
    writeln!(out, "{json_output}")?;
    Ok(())
}

pub fn generate_console_report(
    out: &mut dyn Write,
    report: &RunReport,
    verbose: bool,
) -> Result<()> {
    let summary = &report.summary;
    writeln!(out)?;
    writeln!(out, "{}", "📊 Treasure Hunter Run Summary".bright_cyan().bold())?;
    writeln!(out, "{}", "==============================".cyan())?;
    writeln!(out, "Hunter: {}", summary.hunter.bold())?;
    writeln!(
        out,
        "Mode: {} | Strategy: {} | Seed: {}",
        summary.difficulty, report.strategy, summary.seed
    )?;

    let status = match summary.status {
        SessionStatus::Bankrupt => "💀 BANKRUPT".red(),
        SessionStatus::Exited => "🚪 EXITED".yellow(),
        SessionStatus::Playing => "⏱ TURN LIMIT".yellow(),
    };
    writeln!(out, "Result: {status}")?;
    writeln!(
        out,
        "Turns: {}/{} | Towns visited: {}",
        summary.turns, report.max_turns, summary.towns_visited
    )?;
    writeln!(out, "Gold: {}", summary.gold)?;
    writeln!(
        out,
        "Brawls: {} won, {} lost",
        summary.brawls_won.to_string().green(),
        summary.brawls_lost.to_string().red()
    )?;

    let treasures: Vec<&str> = summary.treasures.iter().map(|t| t.phrase()).collect();
    if treasures.is_empty() {
        writeln!(out, "Treasures: none")?;
    } else {
        writeln!(out, "Treasures: {}", treasures.join(", "))?;
    }
    if summary.has_all_treasures {
        writeln!(out, "{}", "🏆 All three treasures found".green().bold())?;
    }
    let kit: Vec<&str> = summary.kit.iter().map(|item| item.label()).collect();
    let kit = if kit.is_empty() {
        "(empty)".to_string()
    } else {
        kit.join(", ")
    };
    writeln!(out, "Kit: {kit}")?;

    if verbose {
        writeln!(out)?;
        writeln!(out, "{}", "📜 Turn Log".bright_yellow().bold())?;
        writeln!(out, "{}", "===========".yellow())?;
        for entry in &report.turns {
            writeln!(
                out,
                "[{:>3}] {} (gold {})",
                entry.turn,
                entry.command.key(),
                entry.gold
            )?;
            if let Some(departure) = &entry.departure {
                writeln!(out, "      {}", departure.replace('\n', "\n      "))?;
            }
            writeln!(out, "      {}", entry.news.replace('\n', "\n      "))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hunter_game::{Difficulty, Item, Treasure};

    fn sample_report(status: SessionStatus) -> RunReport {
        RunReport {
            strategy: AutoplayStrategy::Explorer,
            max_turns: 10,
            summary: SessionSummary {
                hunter: "Auto".to_string(),
                difficulty: Difficulty::Hard,
                seed: 42,
                status,
                gold: 7,
                turns: 2,
                towns_visited: 1,
                treasures: vec![Treasure::Gem],
                kit: vec![Item::Rope],
                brawls_won: 1,
                brawls_lost: 0,
                has_all_treasures: false,
            },
            turns: vec![TurnLog {
                turn: 1,
                command: Command::Hunt,
                departure: None,
                news: "You searched the town and found a gem".to_string(),
                gold: 7,
            }],
        }
    }

    #[test]
    fn json_report_round_trips_summary_fields() {
        let mut buf = Vec::new();
        generate_json_report(&mut buf, &sample_report(SessionStatus::Exited)).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["strategy"], "explorer");
        assert_eq!(value["summary"]["status"], "exited");
        assert_eq!(value["summary"]["treasures"][0], "gem");
        assert_eq!(value["turns"][0]["command"], "hunt");
        assert!(value["turns"][0].get("departure").is_none());
    }

    #[test]
    fn console_report_lists_outcome_and_log() {
        colored::control::set_override(false);
        let mut buf = Vec::new();
        generate_console_report(&mut buf, &sample_report(SessionStatus::Bankrupt), true).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("BANKRUPT"));
        assert!(!text.contains("All three treasures found"));
        assert!(text.contains("Treasures: a gem"));
        assert!(text.contains("Kit: Rope"));
        assert!(text.contains("[  1] h (gold 7)"));
    }

    #[test]
    fn console_report_marks_a_full_collection() {
        colored::control::set_override(false);
        let mut report = sample_report(SessionStatus::Exited);
        report.summary.treasures = vec![Treasure::Crown, Treasure::Trophy, Treasure::Gem];
        report.summary.has_all_treasures = true;
        let mut buf = Vec::new();
        generate_console_report(&mut buf, &report, false).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("EXITED"));
        assert!(text.contains("All three treasures found"));
    }

    #[test]
    fn turn_limit_is_reported() {
        assert!(sample_report(SessionStatus::Playing).hit_turn_limit());
        assert!(!sample_report(SessionStatus::Bankrupt).hit_turn_limit());
    }
}

use std::io::Write;

use owo_colors::OwoColorize;

use expiryscan_core::Outcome;

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

/// Print one file's outcome as a human-readable line.
pub fn print_outcome(
    w: &mut dyn Write,
    filename: &str,
    outcome: &Outcome,
    color: ColorMode,
) -> std::io::Result<()> {
    match outcome {
        Outcome::Resolved(date) => {
            if color.enabled() {
                writeln!(w, "{}: {}", filename, format!("expires {date}").green())
            } else {
                writeln!(w, "{filename}: expires {date}")
            }
        }
        Outcome::NotFound => {
            if color.enabled() {
                writeln!(w, "{}: {}", filename, "no date found".dimmed())
            } else {
                writeln!(w, "{filename}: no date found")
            }
        }
    }
}

/// Print one file's outcome as a JSON object.
pub fn print_outcome_json(
    w: &mut dyn Write,
    filename: &str,
    outcome: &Outcome,
) -> std::io::Result<()> {
    let value = serde_json::json!({
        "file": filename,
        "expiry_date": outcome.date().map(|d| d.to_string()),
    });
    writeln!(w, "{value}")
}

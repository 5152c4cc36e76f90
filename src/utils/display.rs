//! Display and output formatting utilities

use crate::config::OutputFormat;
use crate::invariants::api::ForcingClosure;
use crate::invariants::{Invariant, ResultSummary};
use anyhow::Result;
use serde::Serialize;
use std::fmt::Display;

/// One report row as JSON: the full summary, or the invariant and its error
#[derive(Serialize)]
#[serde(untagged)]
enum ReportEntry<'a> {
    Computed(&'a ResultSummary),
    Failed { invariant: Invariant, error: &'a str },
}

/// Format invariant results for display
pub struct ResultFormatter;

impl ResultFormatter {
    /// Render one result in the requested output format
    pub fn render(summary: &ResultSummary, format: OutputFormat, show_stats: bool) -> Result<String> {
        match format {
            OutputFormat::Text => Ok(Self::format_result(summary, show_stats)),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(summary)?),
        }
    }

    /// Format a single result for console output
    pub fn format_result(summary: &ResultSummary, show_stats: bool) -> String {
        let mut output = String::new();

        match summary.k {
            Some(k) if summary.invariant.accepts_k() => {
                output.push_str(&format!("=== {} (k = {}) ===\n", summary.invariant, k))
            }
            _ => output.push_str(&format!("=== {} ===\n", summary.invariant)),
        }
        output.push_str(&format!("Value: {}\n", summary.value));
        output.push_str(&format!("Witness: {}\n", Self::format_set(&summary.witness)));

        if show_stats {
            output.push_str(&format!("Bound: {}\n", summary.bound));
            output.push_str(&format!("Backend: {}\n", summary.backend));
            output.push_str(&format!("Sizes visited: {}\n", summary.stats.sizes_visited));
            output.push_str(&format!(
                "Candidates tested: {}\n",
                summary.stats.candidates_tested
            ));
            output.push_str(&format!(
                "Search time: {:.3}s\n",
                summary.stats.elapsed.as_secs_f64()
            ));
        }

        output
    }

    /// Format every invariant of a report as a table; failures show their reason
    pub fn format_report(rows: &[(Invariant, std::result::Result<ResultSummary, String>)]) -> String {
        let mut output = String::new();

        output.push_str("Invariant                | Value | Bound      | Time(ms) | Witness\n");
        output.push_str("-------------------------|-------|------------|----------|--------\n");

        for (invariant, row) in rows {
            match row {
                Ok(summary) => output.push_str(&format!(
                    "{:24} | {:5} | {:10} | {:8} | {}\n",
                    invariant.name(),
                    summary.value,
                    summary.bound.to_string(),
                    summary.stats.elapsed.as_millis(),
                    Self::format_set(&summary.witness)
                )),
                Err(reason) => output.push_str(&format!(
                    "{:24} | {:>5} | {:10} | {:8} | {}\n",
                    invariant.name(),
                    "-",
                    "",
                    "",
                    reason
                )),
            }
        }

        output
    }

    /// Every report row as a JSON array, failures included
    pub fn report_json(rows: &[(Invariant, std::result::Result<ResultSummary, String>)]) -> Result<String> {
        let entries: Vec<ReportEntry<'_>> = rows
            .iter()
            .map(|(invariant, row)| match row {
                Ok(summary) => ReportEntry::Computed(summary),
                Err(error) => ReportEntry::Failed {
                    invariant: *invariant,
                    error,
                },
            })
            .collect();
        Ok(serde_json::to_string_pretty(&entries)?)
    }

    /// Format the fixpoint of a forcing run
    pub fn format_closure<N: Display>(closure: &ForcingClosure<N>) -> String {
        let mut output = String::new();
        let black: Vec<String> = closure.final_black.iter().map(ToString::to_string).collect();

        output.push_str(&format!("Passes: {}\n", closure.passes));
        output.push_str(&format!("Final black set: {}\n", Self::format_set(&black)));
        output.push_str(&format!(
            "Forces all: {}\n",
            if closure.forces_all { "yes" } else { "no" }
        ));

        output
    }

    /// Braced, comma separated list of labels
    pub fn format_set(labels: &[String]) -> String {
        format!("{{{}}}", labels.join(", "))
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err() && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}

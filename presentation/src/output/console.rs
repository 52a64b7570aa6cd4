//! Console output formatter for generation results

use colored::Colorize;
use saloon_application::{BookDraft, GenerationOutcome, SectionContent};
use saloon_domain::Outline;
use serde::Serialize;

/// Formats generation results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format a title outcome with run statistics
    pub fn format_title(outcome: &GenerationOutcome<String>) -> String {
        let mut output = Self::header("Book Title");
        output.push_str(&format!("\n\n  {}\n", outcome.value.bold()));
        output.push_str(&Self::stats(outcome));
        output.push_str(&Self::footer());
        output
    }

    /// Format an outline outcome with run statistics
    pub fn format_toc(outcome: &GenerationOutcome<Outline>) -> String {
        let mut output = Self::header("Table of Contents");
        output.push_str("\n\n");
        output.push_str(&Self::format_outline(&outcome.value));
        output.push_str(&Self::stats(outcome));
        output.push_str(&Self::footer());
        output
    }

    /// Format a section outcome with run statistics
    pub fn format_section(id: &str, title: &str, outcome: &GenerationOutcome<SectionContent>) -> String {
        let mut output = Self::header(&format!("{} {}", id, title));
        output.push_str(&format!("\n\n{}\n", outcome.value.content));
        output.push_str(&format!(
            "\n{} {}",
            "Words:".cyan().bold(),
            outcome.value.word_count
        ));
        output.push_str(&Self::stats(outcome));
        output.push_str(&Self::footer());
        output
    }

    /// Format a whole book draft
    pub fn format_book(draft: &BookDraft) -> String {
        let mut output = Self::header(&draft.title);
        output.push_str(&format!("\n{} {}\n\n", "Topic:".cyan().bold(), draft.topic));
        output.push_str(&Self::section_header("Contents"));
        output.push_str(&Self::format_outline(&draft.outline));

        for section in &draft.sections {
            let heading = format!("{} {} {}", "#".repeat(section.level), section.id, section.title);
            let heading = if section.success {
                heading.yellow().bold()
            } else {
                heading.red().bold()
            };
            output.push_str(&format!("\n{}\n\n{}\n", heading, section.content));
        }

        output.push_str(&format!(
            "\n{} {} in {} parts\n",
            "Total words:".cyan().bold(),
            draft.total_words(),
            draft.sections.len()
        ));
        let failed = draft.failed_sections();
        if !failed.is_empty() {
            output.push_str(&format!(
                "{} {}\n",
                "Without consensus:".yellow().bold(),
                failed.join(", ")
            ));
        }
        output.push_str(&Self::footer());
        output
    }

    /// Numbered outline, one line per entry
    pub fn format_outline(outline: &Outline) -> String {
        outline
            .entries()
            .iter()
            .map(|entry| {
                format!(
                    "{}{} {}\n",
                    "  ".repeat(entry.level.saturating_sub(1)),
                    entry.id,
                    entry.title
                )
            })
            .collect()
    }

    /// Just the generated text, for piping
    pub fn format_plain(text: &str) -> String {
        format!("{}\n", text.trim_end())
    }

    /// Format as JSON
    pub fn format_json<T: Serialize>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }

    fn stats<T>(outcome: &GenerationOutcome<T>) -> String {
        let how = if outcome.consensus {
            "consensus".green()
        } else if outcome.forced_consensus {
            "forced".yellow()
        } else {
            "fallback".red()
        };
        format!(
            "\n{} {} after {} turns ({} ms)\n",
            "Outcome:".cyan().bold(),
            how,
            outcome.attempts,
            outcome.duration_ms
        )
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

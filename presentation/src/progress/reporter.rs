//! Progress reporting for collaboration runs

use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use saloon_application::ports::progress::CollaborationProgress;
use saloon_application::ports::provider::ProviderError;
use saloon_domain::core::string::preview;
use saloon_domain::{Agent, CollaborationResult, ProcessedResponse};
use std::collections::HashMap;
use std::sync::Mutex;

/// Reports progress with one bar per running collaboration
///
/// Parallel section runs each get their own line under a shared
/// [`MultiProgress`].
pub struct ProgressReporter {
    multi: MultiProgress,
    bars: Mutex<HashMap<String, ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            bars: Mutex::new(HashMap::new()),
        }
    }

    fn run_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn with_bar(&self, label: &str, f: impl FnOnce(&ProgressBar)) {
        if let Ok(bars) = self.bars.lock()
            && let Some(bar) = bars.get(label)
        {
            f(bar);
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl CollaborationProgress for ProgressReporter {
    fn on_run_start(&self, label: &str, agents: &[Agent], max_turns: usize) {
        let bar = self.multi.add(ProgressBar::new(max_turns as u64));
        bar.set_style(Self::run_style());
        bar.set_prefix(label.to_string());
        bar.set_message(format!("{} agents", agents.len()));

        if let Ok(mut bars) = self.bars.lock() {
            bars.insert(label.to_string(), bar);
        }
    }

    fn on_turn_start(&self, label: &str, _turn: usize, agent: &Agent) {
        self.with_bar(label, |bar| {
            bar.set_message(format!("{} is writing...", agent.name));
        });
    }

    fn on_turn_complete(
        &self,
        label: &str,
        _turn: usize,
        agent: &Agent,
        response: &ProcessedResponse,
    ) {
        self.with_bar(label, |bar| {
            let status = if response.consensus {
                format!("{} {} agrees", "v".green(), agent.name)
            } else {
                format!("{} {}", "-".dimmed(), agent.name)
            };
            bar.set_message(status);
            bar.inc(1);
        });
    }

    fn on_turn_failed(
        &self,
        label: &str,
        _turn: usize,
        agent: &Agent,
        error: &ProviderError,
        attempt: usize,
    ) {
        self.with_bar(label, |bar| {
            bar.set_message(format!(
                "{} {} failed ({}, attempt {})",
                "x".red(),
                agent.name,
                error.kind(),
                attempt
            ));
        });
    }

    fn on_run_complete(&self, label: &str, result: &CollaborationResult) {
        let bar = self.bars.lock().ok().and_then(|mut bars| bars.remove(label));
        if let Some(bar) = bar {
            bar.finish_with_message(outcome_text(result));
        }
    }
}

fn outcome_text(result: &CollaborationResult) -> String {
    if result.consensus {
        format!("consensus after {} turns", result.turns)
            .green()
            .to_string()
    } else if result.aborted {
        format!("aborted after {} turns", result.turns).red().to_string()
    } else if result.forced_consensus {
        format!("forced after {} turns", result.turns)
            .yellow()
            .to_string()
    } else {
        format!("no consensus after {} turns", result.turns)
            .yellow()
            .to_string()
    }
}

/// Simple text-based progress (no fancy UI)
///
/// Prints each turn as a chat line, e.g. `[title] <Zero> Let's call it...`
pub struct SimpleProgress;

impl CollaborationProgress for SimpleProgress {
    fn on_run_start(&self, label: &str, agents: &[Agent], max_turns: usize) {
        let names: Vec<&str> = agents.iter().map(|a| a.name.as_str()).collect();
        println!(
            "{} {} with {} (max {} turns)",
            "->".cyan(),
            label.bold(),
            names.join(", "),
            max_turns
        );
    }

    fn on_turn_complete(
        &self,
        label: &str,
        _turn: usize,
        agent: &Agent,
        response: &ProcessedResponse,
    ) {
        let line = preview(&response.content, 100);
        let mark = if response.consensus { " [agreed]" } else { "" };
        println!(
            "  [{}] <{}> {}{}",
            label.dimmed(),
            agent.name.yellow(),
            line,
            mark.green()
        );
    }

    fn on_turn_failed(
        &self,
        label: &str,
        _turn: usize,
        agent: &Agent,
        error: &ProviderError,
        attempt: usize,
    ) {
        println!(
            "  [{}] {} {} failed: {} (attempt {})",
            label.dimmed(),
            "x".red(),
            agent.name,
            error,
            attempt
        );
    }

    fn on_run_complete(&self, label: &str, result: &CollaborationResult) {
        println!("{} {}: {}", "<-".cyan(), label.bold(), outcome_text(result));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use saloon_domain::{ContextVariables, Persona, Task};

    fn result(consensus: bool, forced: bool, aborted: bool) -> CollaborationResult {
        CollaborationResult {
            consensus,
            forced_consensus: forced,
            content: None,
            turns: 3,
            messages: vec![],
            metadata: ContextVariables::new(),
            aborted,
        }
    }

    #[test]
    fn test_outcome_text() {
        colored::control::set_override(false);
        assert_eq!(outcome_text(&result(true, false, false)), "consensus after 3 turns");
        assert_eq!(outcome_text(&result(false, true, false)), "forced after 3 turns");
        assert_eq!(outcome_text(&result(false, true, true)), "aborted after 3 turns");
        assert_eq!(
            outcome_text(&result(false, false, false)),
            "no consensus after 3 turns"
        );
    }

    #[test]
    fn test_reporter_tracks_bars_per_label() {
        let reporter = ProgressReporter::new();
        let agents = vec![Persona::Zero.agent(Task::Title), Persona::Gustave.agent(Task::Title)];

        reporter.on_run_start("section 1", &agents, 4);
        reporter.on_run_start("section 2", &agents, 4);
        assert_eq!(reporter.bars.lock().unwrap().len(), 2);

        reporter.on_turn_start("section 1", 1, &agents[0]);
        reporter.on_run_complete("section 1", &result(true, false, false));
        let bars = reporter.bars.lock().unwrap();
        assert_eq!(bars.len(), 1);
        assert!(bars.contains_key("section 2"));
    }
}

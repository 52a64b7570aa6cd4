//! Progress notification port
//!
//! Defines the interface for reporting progress during a collaboration run.

use crate::ports::provider::ProviderError;
use saloon_domain::{Agent, CollaborationResult, ProcessedResponse};

/// Callback for progress updates during a collaboration run
///
/// Implementations live in the binary and can display progress in various
/// ways. Every callback has a no-op default.
pub trait CollaborationProgress: Send + Sync {
    /// Called once before the first turn
    fn on_run_start(&self, _label: &str, _agents: &[Agent], _max_turns: usize) {}

    /// Called before each provider call (`turn` is 1-indexed)
    ///
    /// Section runs share one notifier, so every turn callback carries the
    /// run label.
    fn on_turn_start(&self, _label: &str, _turn: usize, _agent: &Agent) {}

    /// Called after a turn's response has been processed
    fn on_turn_complete(
        &self,
        _label: &str,
        _turn: usize,
        _agent: &Agent,
        _response: &ProcessedResponse,
    ) {
    }

    /// Called when a provider call fails (`attempt` counts consecutive failures)
    fn on_turn_failed(
        &self,
        _label: &str,
        _turn: usize,
        _agent: &Agent,
        _error: &ProviderError,
        _attempt: usize,
    ) {
    }

    /// Called once with the final result
    fn on_run_complete(&self, _label: &str, _result: &CollaborationResult) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl CollaborationProgress for NoProgress {}

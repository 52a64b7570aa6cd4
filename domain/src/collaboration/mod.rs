//! Collaboration domain
//!
//! Run-scoped state shared between turns ([`ContextVariables`]), next-speaker
//! selection ([`TurnStrategy`], [`HandoffManager`]) and the record a run
//! produces ([`CollaborationResult`]).
//!
//! ```text
//! INIT ──▶ RUNNING ──┬──▶ CONSENSUS_REACHED
//!                    ├──▶ FORCED_CONSENSUS   (budget or failures exhausted, forcing on)
//!                    └──▶ FAILED             (no consensus, forcing off)
//! ```

pub mod context;
pub mod handoff;
pub mod result;
pub mod strategy;

pub use context::ContextVariables;
pub use handoff::{HANDOFF_MESSAGE_KEY, Handoff, HandoffManager};
pub use result::{CollaborationResult, RunOutcome};
pub use strategy::TurnStrategy;

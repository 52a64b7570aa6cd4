//! Domain layer for agent-saloon
//!
//! This crate contains the core collaboration logic, entities, and value
//! objects. It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Collaboration
//!
//! Several personas take turns refining one artifact (a title, a table of
//! contents, a section of prose) until they agree:
//!
//! - **Explicit consensus**: an agent ends its turn with `Consensus: True`
//! - **Implicit consensus**: two consecutive turns are nearly the same text
//! - **Forced consensus**: the turn budget runs out and the last turn wins
//!
//! ## Extraction
//!
//! Agents answer in free text. The extractors turn that text into a title,
//! an [`Outline`] or clean section prose, falling back through looser
//! readings instead of failing.

pub mod agent;
pub mod collaboration;
pub mod consensus;
pub mod core;
pub mod extraction;
pub mod outline;
pub mod prompt;
pub mod session;

// Re-export commonly used types
pub use agent::{
    Agent, BOOK_TITLE_KEY, ConsensusMarker, Persona, ProcessedResponse, ResponsePolicy, Task,
};
pub use collaboration::{
    CollaborationResult, ContextVariables, Handoff, HandoffManager, RunOutcome, TurnStrategy,
};
pub use consensus::{ConsensusAnalysis, ConsensusDetector, jaccard_similarity};
pub use core::error::DomainError;
pub use extraction::{
    DEFAULT_TITLE, OutlineBounds, clean_section_content, extract_outline, extract_title,
};
pub use outline::{Chapter, Outline, OutlineEntry, Section, Subsection, sort_section_ids};
pub use prompt::{PersonaPromptTemplate, PromptTemplate};
pub use session::entities::{Message, Role};

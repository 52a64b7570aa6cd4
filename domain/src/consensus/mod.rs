//! Consensus domain
//!
//! Decides whether a collaboration run should end. Agreement is explicit
//! (an agent writes `Consensus: True`) or implicit (two consecutive turns
//! are nearly identical by token-set similarity).

pub mod detector;
pub mod similarity;

pub use detector::{ConsensusAnalysis, ConsensusDetector, DEFAULT_SIMILARITY_THRESHOLD};
pub use similarity::jaccard_similarity;

//! Agent domain.
//!
//! An [`Agent`](entities::Agent) is a persona bound to a model and a
//! provider, plus the [`ResponsePolicy`](response::ResponsePolicy) that turns
//! its raw text into a [`ProcessedResponse`](response::ProcessedResponse).

pub mod entities;
pub mod markers;
pub mod persona;
pub mod response;

pub use entities::Agent;
pub use markers::ConsensusMarker;
pub use persona::{Persona, Task};
pub use response::{BOOK_TITLE_KEY, ProcessedResponse, ResponsePolicy};

//! Collaboration history domain.
//!
//! - [`entities::Message`]: a single user or assistant message
//! - [`entities::Role`]: who produced a message

pub mod entities;

//! Outline domain
//!
//! The chapter → section → subsection tree a book is written from, and the
//! numeric ordering of its dot-path identifiers.

pub mod entities;
pub mod ordering;

pub use entities::{Chapter, Outline, OutlineEntry, Section, Subsection};
pub use ordering::{compare_section_ids, section_sort_key, sort_section_ids};

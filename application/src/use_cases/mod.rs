//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod collaborate;
pub mod generate;
pub mod write_book;

#[cfg(test)]
pub(crate) mod test_support;

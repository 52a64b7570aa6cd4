//! Core domain concepts shared across all subdomains.
//!
//! - [`error::DomainError`]: configuration-class errors
//! - [`string::truncate`]: UTF-8 safe preview helper used in logs

pub mod error;
pub mod string;

//! Application-level configuration.
//!
//! Explicit configuration values handed to use case constructors:
//!
//! - [`CollaborationParams`]: turn loop control (budget, retries, consensus detection)
//! - [`GenerationConfig`]: per-task settings for the title, outline and section generators

pub mod collaboration_params;
pub mod generation_config;

pub use collaboration_params::{CollaborationParams, DEFAULT_TEMPERATURE};
pub use generation_config::{GenerationConfig, SectionConfig, TitleConfig, TocConfig};

//! Prompt domain
//!
//! Seed prompts for each generation task and persona system instructions.

mod persona;
mod template;

pub use persona::PersonaPromptTemplate;
pub use template::PromptTemplate;

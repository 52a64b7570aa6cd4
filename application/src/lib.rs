//! Application layer for agent-saloon
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{
    CollaborationParams, GenerationConfig, SectionConfig, TitleConfig, TocConfig,
};
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    progress::{CollaborationProgress, NoProgress},
    provider::{
        ProviderAdapter, ProviderError, ProviderMetadata, ProviderRegistry, ProviderRequest,
        ProviderResponse,
    },
};
pub use use_cases::collaborate::{
    CollaborationCoordinator, CollaborationError, CollaborationInput,
};
pub use use_cases::generate::{
    GenerationOutcome, SectionContent, SectionGenerator, SectionRequest, TitleGenerator,
    TocGenerator,
};
pub use use_cases::write_book::{
    BookAgents, BookDraft, DraftSection, WriteBookInput, WriteBookUseCase,
};

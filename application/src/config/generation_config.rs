//! Per-task generation settings.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleConfig {
    /// Turn budget of the title run
    pub max_attempts: usize,
    pub force_consensus: bool,
}

impl Default for TitleConfig {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            force_consensus: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocConfig {
    pub max_attempts: usize,
    pub force_consensus: bool,
    pub min_chapters: usize,
    pub max_chapters: usize,
}

impl Default for TocConfig {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            force_consensus: true,
            min_chapters: 5,
            max_chapters: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionConfig {
    pub max_attempts: usize,
    pub force_consensus: bool,
    pub min_words: usize,
    pub max_words: usize,
}

impl Default for SectionConfig {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            force_consensus: true,
            min_words: 500,
            max_words: 2000,
        }
    }
}

/// Settings for the title, outline and section generators
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub title: TitleConfig,
    pub toc: TocConfig,
    pub section: SectionConfig,
    /// Section runs allowed in flight at once when writing a whole book
    pub max_parallel_sections: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            title: TitleConfig::default(),
            toc: TocConfig::default(),
            section: SectionConfig::default(),
            max_parallel_sections: 1,
        }
    }
}

impl GenerationConfig {
    pub fn with_chapters(mut self, min: usize, max: usize) -> Self {
        self.toc.min_chapters = min;
        self.toc.max_chapters = max;
        self
    }

    pub fn with_words(mut self, min: usize, max: usize) -> Self {
        self.section.min_words = min;
        self.section.max_words = max;
        self
    }

    pub fn with_max_attempts(mut self, max: usize) -> Self {
        self.title.max_attempts = max;
        self.toc.max_attempts = max;
        self.section.max_attempts = max;
        self
    }

    pub fn with_max_parallel_sections(mut self, max: usize) -> Self {
        self.max_parallel_sections = max.max(1);
        self
    }
}

//! Generation configuration from TOML (`[generation]` section)

use crate::config::issue::{ConfigIssue, ConfigIssueCode};
use saloon_application::config::{GenerationConfig, SectionConfig, TitleConfig, TocConfig};
use serde::{Deserialize, Serialize};

/// Raw per-task generation settings
///
/// # Example
///
/// ```toml
/// [generation]
/// max_parallel_sections = 2
///
/// [generation.title]
/// max_attempts = 10
/// force_consensus = true
///
/// [generation.toc]
/// min_chapters = 5
/// max_chapters = 10
///
/// [generation.section]
/// min_words = 500
/// max_words = 2000
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGenerationConfig {
    pub max_parallel_sections: usize,
    pub title: FileTitleConfig,
    pub toc: FileTocConfig,
    pub section: FileSectionConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTitleConfig {
    pub max_attempts: usize,
    pub force_consensus: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTocConfig {
    pub max_attempts: usize,
    pub force_consensus: bool,
    pub min_chapters: usize,
    pub max_chapters: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSectionConfig {
    pub max_attempts: usize,
    pub force_consensus: bool,
    pub min_words: usize,
    pub max_words: usize,
}

impl Default for FileGenerationConfig {
    fn default() -> Self {
        Self {
            max_parallel_sections: GenerationConfig::default().max_parallel_sections,
            title: FileTitleConfig::default(),
            toc: FileTocConfig::default(),
            section: FileSectionConfig::default(),
        }
    }
}

impl Default for FileTitleConfig {
    fn default() -> Self {
        let config = TitleConfig::default();
        Self {
            max_attempts: config.max_attempts,
            force_consensus: config.force_consensus,
        }
    }
}

impl Default for FileTocConfig {
    fn default() -> Self {
        let config = TocConfig::default();
        Self {
            max_attempts: config.max_attempts,
            force_consensus: config.force_consensus,
            min_chapters: config.min_chapters,
            max_chapters: config.max_chapters,
        }
    }
}

impl Default for FileSectionConfig {
    fn default() -> Self {
        let config = SectionConfig::default();
        Self {
            max_attempts: config.max_attempts,
            force_consensus: config.force_consensus,
            min_words: config.min_words,
            max_words: config.max_words,
        }
    }
}

fn out_of_range(field: &str, message: String) -> ConfigIssue {
    ConfigIssue::warning(
        ConfigIssueCode::OutOfRange {
            field: field.to_string(),
        },
        message,
    )
}

/// Turn budgets must be positive
fn attempts(field: &str, value: usize, issues: &mut Vec<ConfigIssue>) -> usize {
    if value == 0 {
        issues.push(out_of_range(field, format!("{} cannot be 0, using 1", field)));
        1
    } else {
        value
    }
}

impl FileGenerationConfig {
    pub fn to_config(&self) -> (GenerationConfig, Vec<ConfigIssue>) {
        let mut issues = Vec::new();

        let mut max_chapters = self.toc.max_chapters;
        if max_chapters < self.toc.min_chapters {
            issues.push(out_of_range(
                "generation.toc.max_chapters",
                format!(
                    "generation.toc.max_chapters ({}) is below min_chapters ({}), using {}",
                    max_chapters, self.toc.min_chapters, self.toc.min_chapters
                ),
            ));
            max_chapters = self.toc.min_chapters;
        }

        let mut max_words = self.section.max_words;
        if max_words < self.section.min_words {
            issues.push(out_of_range(
                "generation.section.max_words",
                format!(
                    "generation.section.max_words ({}) is below min_words ({}), using {}",
                    max_words, self.section.min_words, self.section.min_words
                ),
            ));
            max_words = self.section.min_words;
        }

        if self.max_parallel_sections == 0 {
            issues.push(out_of_range(
                "generation.max_parallel_sections",
                "generation.max_parallel_sections cannot be 0, using 1".to_string(),
            ));
        }

        let config = GenerationConfig {
            title: TitleConfig {
                max_attempts: attempts(
                    "generation.title.max_attempts",
                    self.title.max_attempts,
                    &mut issues,
                ),
                force_consensus: self.title.force_consensus,
            },
            toc: TocConfig {
                max_attempts: attempts(
                    "generation.toc.max_attempts",
                    self.toc.max_attempts,
                    &mut issues,
                ),
                force_consensus: self.toc.force_consensus,
                min_chapters: self.toc.min_chapters,
                max_chapters,
            },
            section: SectionConfig {
                max_attempts: attempts(
                    "generation.section.max_attempts",
                    self.section.max_attempts,
                    &mut issues,
                ),
                force_consensus: self.section.force_consensus,
                min_words: self.section.min_words,
                max_words,
            },
            max_parallel_sections: self.max_parallel_sections.max(1),
        };

        (config, issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_application_defaults() {
        let (config, issues) = FileGenerationConfig::default().to_config();
        assert!(issues.is_empty());
        assert_eq!(config, GenerationConfig::default());
    }

    #[test]
    fn test_partial_tables() {
        let file: FileGenerationConfig = toml::from_str(
            r#"
max_parallel_sections = 4

[toc]
min_chapters = 3

[section]
max_words = 800
"#,
        )
        .unwrap();

        let (config, issues) = file.to_config();
        assert!(issues.is_empty());
        assert_eq!(config.max_parallel_sections, 4);
        assert_eq!(config.toc.min_chapters, 3);
        assert_eq!(config.toc.max_chapters, 10);
        assert_eq!(config.section.max_words, 800);
        assert!(config.title.force_consensus);
    }

    #[test]
    fn test_inverted_bounds_are_reported() {
        let file = FileGenerationConfig {
            toc: FileTocConfig {
                min_chapters: 8,
                max_chapters: 4,
                ..Default::default()
            },
            title: FileTitleConfig {
                max_attempts: 0,
                ..Default::default()
            },
            ..Default::default()
        };

        let (config, issues) = file.to_config();
        assert_eq!(issues.len(), 2);
        assert_eq!(config.toc.max_chapters, 8);
        assert_eq!(config.title.max_attempts, 1);
    }
}

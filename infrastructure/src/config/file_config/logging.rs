//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Raw logging configuration
///
/// ```toml
/// [logging]
/// transcript_dir = "~/.local/share/agent-saloon/transcripts"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Directory for JSONL conversation transcripts; none are written when unset
    pub transcript_dir: Option<PathBuf>,
}

impl FileLoggingConfig {
    /// Transcript directory with a leading `~` expanded
    pub fn resolved_transcript_dir(&self) -> Option<PathBuf> {
        let dir = self.transcript_dir.as_deref()?;
        Some(expand_home(dir))
    }
}

fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| path.to_path_buf()),
        Err(_) => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_by_default() {
        assert!(FileLoggingConfig::default().resolved_transcript_dir().is_none());
    }

    #[test]
    fn test_plain_path_is_kept() {
        let config = FileLoggingConfig {
            transcript_dir: Some(PathBuf::from("/tmp/saloon")),
        };
        assert_eq!(
            config.resolved_transcript_dir(),
            Some(PathBuf::from("/tmp/saloon"))
        );
    }

    #[test]
    fn test_home_is_expanded() {
        let config = FileLoggingConfig {
            transcript_dir: Some(PathBuf::from("~/transcripts")),
        };
        let resolved = config.resolved_transcript_dir().unwrap();
        if let Some(home) = dirs::home_dir() {
            assert_eq!(resolved, home.join("transcripts"));
        }
    }
}

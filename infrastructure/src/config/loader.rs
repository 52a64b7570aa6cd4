//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "agent-saloon";
const PROJECT_FILES: [&str; 2] = ["saloon.toml", ".saloon.toml"];
const ENV_PREFIX: &str = "SALOON_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Environment: `SALOON_<SECTION>__<KEY>` (e.g. `SALOON_GENERATION__MAX_PARALLEL_SECTIONS`)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./saloon.toml` or `./.saloon.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/agent-saloon/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(project_path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(&project_path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(Box::new)
    }

    /// Load a single file over the defaults, ignoring every other source
    pub fn load_file(path: &Path) -> Result<FileConfig, Box<figment::Error>> {
        Figment::new()
            .merge(Serialized::defaults(FileConfig::default()))
            .merge(Toml::file(path))
            .extract()
            .map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Returns XDG_CONFIG_HOME/agent-saloon/config.toml if set,
    /// otherwise the platform config directory equivalent
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources() {
        println!("Configuration sources (in priority order):");
        println!("  [     ] Env:     {}<SECTION>__<KEY>", ENV_PREFIX);

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./saloon.toml or ./.saloon.toml");
        }

        if let Some(path) = Self::global_config_path() {
            let mark = if path.exists() { "FOUND" } else { "     " };
            println!("  [{}] Global:  {}", mark, path.display());
        }

        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config, FileConfig::default());
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains("agent-saloon"));
    }

    #[test]
    fn test_project_file_and_env_override() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "saloon.toml",
                r#"
[generation]
max_parallel_sections = 2

[agents]
roster = ["zero", "camille"]
"#,
            )?;
            jail.set_env("SALOON_GENERATION__MAX_PARALLEL_SECTIONS", "6");

            let config = ConfigLoader::load(None).map_err(|e| *e)?;
            assert_eq!(config.generation.max_parallel_sections, 6);
            assert_eq!(config.agents.roster, vec!["zero", "camille"]);
            Ok(())
        });
    }

    #[test]
    fn test_explicit_path_beats_project_file() {
        Jail::expect_with(|jail| {
            jail.create_file(".saloon.toml", "[collaboration]\nretry_backoff_ms = 10\n")?;
            jail.create_file("custom.toml", "[collaboration]\nretry_backoff_ms = 20\n")?;

            let explicit = PathBuf::from("custom.toml");
            let config = ConfigLoader::load(Some(&explicit)).map_err(|e| *e)?;
            assert_eq!(config.collaboration.retry_backoff_ms, 20);
            Ok(())
        });
    }

    #[test]
    fn test_load_file_reports_type_errors() {
        Jail::expect_with(|jail| {
            jail.create_file("bad.toml", "[generation]\nmax_parallel_sections = \"many\"\n")?;
            assert!(ConfigLoader::load_file(Path::new("bad.toml")).is_err());
            Ok(())
        });
    }
}

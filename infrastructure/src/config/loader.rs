//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Project-level config file names, checked in order
const PROJECT_CONFIG_FILES: [&str; 2] = ["chatline.toml", ".chatline.toml"];

/// Prefix for environment overrides (`CHATLINE_BACKEND__ENDPOINT`)
const ENV_PREFIX: &str = "CHATLINE_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `CHATLINE_*` environment variables
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./chatline.toml` or `./.chatline.toml`
    /// 4. XDG config: `$XDG_CONFIG_HOME/chatline/config.toml`
    /// 5. Default values
    ///
    /// Discovered files are optional; an explicit path must exist.
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        if let Some(path) = config_path.filter(|p| !p.exists()) {
            return Err(Box::new(figment::Error::from(format!(
                "config file not found: {}",
                path.display()
            ))));
        }

        let global = Self::global_config_path().filter(|p| p.exists());
        let project = Self::project_config_path();

        Self::figment(global.as_deref(), project.as_deref(), config_path.map(PathBuf::as_path))
            .merge(Self::env())
            .extract()
            .map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// File layers only, lowest priority first
    fn figment(global: Option<&Path>, project: Option<&Path>, explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        for path in [global, project, explicit].into_iter().flatten() {
            debug!(path = %path.display(), "Merging config file");
            figment = figment.merge(Toml::file(path));
        }

        figment
    }

    /// `CHATLINE_BACKEND__ENDPOINT` maps to `backend.endpoint`
    fn env() -> Env {
        Env::prefixed(ENV_PREFIX).split("__")
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/chatline/config.toml if set,
    /// otherwise the platform config directory.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("chatline").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_CONFIG_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(explicit: Option<&PathBuf>) {
        println!("Configuration sources (in priority order):");
        println!("  [ENV  ] Variables: {}*", ENV_PREFIX);

        if let Some(path) = explicit {
            let mark = if path.exists() { "FOUND" } else { "MISS " };
            println!("  [{}] Explicit: {}", mark, path.display());
        }

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./chatline.toml or ./.chatline.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatline_domain::RenderFormat;
    use std::fs;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.backend.endpoint, "http://localhost:8080/chat");
        assert_eq!(config.output.format, RenderFormat::Terminal);
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("chatline"));
        assert!(path.ends_with("config.toml"));
    }

    #[test]
    fn test_later_files_override_earlier_ones() {
        let dir = tempfile::tempdir().unwrap();
        let global = write(
            dir.path(),
            "global.toml",
            r#"
[backend]
endpoint = "http://global.example/chat"
request_timeout_secs = 60

[output]
format = "plain"
"#,
        );
        let project = write(
            dir.path(),
            "chatline.toml",
            r#"
[backend]
endpoint = "http://project.example/chat"
"#,
        );

        let config: FileConfig = ConfigLoader::figment(Some(&global), Some(&project), None)
            .extract()
            .unwrap();

        assert_eq!(config.backend.endpoint, "http://project.example/chat");
        // Keys absent from the project file survive from the global one
        assert_eq!(config.backend.request_timeout_secs, Some(60));
        assert_eq!(config.output.format, RenderFormat::Plain);
    }

    #[test]
    fn test_explicit_path_has_highest_file_priority() {
        let dir = tempfile::tempdir().unwrap();
        let project = write(dir.path(), "chatline.toml", "[output]\nformat = \"html\"\n");
        let explicit = write(dir.path(), "custom.toml", "[output]\nformat = \"raw\"\n");

        let config: FileConfig = ConfigLoader::figment(None, Some(&project), Some(&explicit))
            .extract()
            .unwrap();

        assert_eq!(config.output.format, RenderFormat::Raw);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");

        let error = ConfigLoader::load(Some(&missing)).unwrap_err();

        assert!(error.to_string().contains("nope.toml"));
    }

    #[test]
    fn test_env_overrides_config_files() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "custom.toml",
                "[backend]\nendpoint = \"http://file.example/chat\"\nrequest_timeout_secs = 10\n",
            )?;
            jail.set_env("CHATLINE_BACKEND__ENDPOINT", "http://env.example/chat");
            jail.set_env("CHATLINE_OUTPUT__FORMAT", "raw");

            let config: FileConfig =
                ConfigLoader::figment(None, None, Some(Path::new("custom.toml")))
                    .merge(ConfigLoader::env())
                    .extract()?;

            assert_eq!(config.backend.endpoint, "http://env.example/chat");
            assert_eq!(config.backend.request_timeout_secs, Some(10));
            assert_eq!(config.output.format, RenderFormat::Raw);
            Ok(())
        });
    }

    #[test]
    fn test_malformed_value_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let bad = write(dir.path(), "bad.toml", "[output]\nformat = \"sepia\"\n");

        let result: Result<FileConfig, _> = ConfigLoader::figment(None, None, Some(&bad)).extract();

        assert!(result.is_err());
    }
}

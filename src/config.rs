use crate::domain::{Version, VersionBump};
use crate::error::{BumpError, Result};
use crate::git::Backend;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Placeholder replaced by the new version in commit message templates
pub const VERSION_PLACEHOLDER: &str = "{version}";

/// Name of the project-local configuration file
pub const CONFIG_FILE_NAME: &str = "bumpversion.toml";

/// Represents the on-disk configuration for bump-version.
///
/// Every key is optional; command-line flags take precedence over it.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default = "default_main_branch")]
    pub main_branch: String,

    #[serde(default = "default_file")]
    pub file: PathBuf,

    #[serde(default = "default_commit_message")]
    pub commit_message: String,

    #[serde(default)]
    pub backend: Backend,
}

fn default_main_branch() -> String {
    "main".to_string()
}

fn default_file() -> PathBuf {
    PathBuf::from("VERSION")
}

fn default_commit_message() -> String {
    format!("release: v{}", VERSION_PLACEHOLDER)
}

impl Default for Config {
    fn default() -> Self {
        Config {
            main_branch: default_main_branch(),
            file: default_file(),
            commit_message: default_commit_message(),
            backend: Backend::default(),
        }
    }
}

/// Values supplied on the command line that override the config file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOverrides {
    pub file: Option<PathBuf>,
    pub main_branch: Option<String>,
    pub backend: Option<Backend>,
    pub major: bool,
    pub minor: bool,
    pub dry_run: bool,
}

/// Immutable settings for a single bump run
#[derive(Debug, Clone, PartialEq)]
pub struct BumpConfig {
    pub bump_major: bool,
    pub bump_minor: bool,
    pub main_branch: String,
    pub file_path: PathBuf,
    pub commit_message: String,
    pub dry_run: bool,
}

impl Default for BumpConfig {
    fn default() -> Self {
        BumpConfig::from_config(&Config::default(), false, false, false)
    }
}

impl BumpConfig {
    fn from_config(config: &Config, bump_major: bool, bump_minor: bool, dry_run: bool) -> Self {
        BumpConfig {
            bump_major,
            bump_minor,
            main_branch: config.main_branch.clone(),
            file_path: config.file.clone(),
            commit_message: config.commit_message.clone(),
            dry_run,
        }
    }

    /// The bump kind requested by the flags
    pub fn bump(&self) -> VersionBump {
        VersionBump::from_flags(self.bump_major, self.bump_minor)
    }

    /// Render the commit message for `version`
    pub fn commit_message_for(&self, version: &Version) -> String {
        self.commit_message
            .replace(VERSION_PLACEHOLDER, &version.to_string())
    }
}

impl Config {
    /// Check the values that cannot be expressed through types alone.
    pub fn validate(&self) -> Result<()> {
        if self.main_branch.trim().is_empty() {
            return Err(BumpError::config("main_branch must not be empty"));
        }

        if self.file.as_os_str().is_empty() {
            return Err(BumpError::config("file must not be empty"));
        }

        let placeholders = self.commit_message.matches(VERSION_PLACEHOLDER).count();
        if placeholders != 1 {
            return Err(BumpError::config(format!(
                "commit_message '{}' should have exactly one {} placeholder, found {}",
                self.commit_message, VERSION_PLACEHOLDER, placeholders
            )));
        }

        Ok(())
    }

    /// Apply command-line overrides, validate, and produce the run settings.
    ///
    /// # Returns
    /// * `Ok((BumpConfig, Backend))` - Settings for the workflow and the backend to open
    /// * `Err` - If the merged configuration is invalid
    pub fn resolve(mut self, overrides: CliOverrides) -> Result<(BumpConfig, Backend)> {
        if let Some(file) = overrides.file {
            self.file = file;
        }
        if let Some(main_branch) = overrides.main_branch {
            self.main_branch = main_branch;
        }
        if let Some(backend) = overrides.backend {
            self.backend = backend;
        }

        self.validate()?;

        let bump_config =
            BumpConfig::from_config(&self, overrides.major, overrides.minor, overrides.dry_run);
        Ok((bump_config, self.backend))
    }
}

/// Parse configuration from TOML text.
pub fn parse_config(content: &str) -> Result<Config> {
    toml::from_str(content).map_err(|e| BumpError::config(e.to_string()))
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `bumpversion.toml` in current directory
/// 3. `.bumpversion.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let path = match config_path {
        Some(path) => path.to_path_buf(),
        None => match discover_config_file() {
            Some(path) => path,
            None => return Ok(Config::default()),
        },
    };

    tracing::debug!(path = %path.display(), "loading configuration");
    let content = fs::read_to_string(&path)
        .map_err(|e| BumpError::config(format!("Cannot read {}: {}", path.display(), e)))?;

    parse_config(&content).map_err(|e| match e {
        BumpError::Config(msg) => BumpError::config(format!("Invalid {}: {}", path.display(), msg)),
        other => other,
    })
}

fn discover_config_file() -> Option<PathBuf> {
    let local = Path::new(".").join(CONFIG_FILE_NAME);
    if local.exists() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join(format!(".{}", CONFIG_FILE_NAME)))
        .filter(|path| path.exists())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.main_branch, "main");
        assert_eq!(config.file, PathBuf::from("VERSION"));
        assert_eq!(config.commit_message, "release: v{version}");
        assert_eq!(config.backend, Backend::Cli);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_config_keeps_defaults() {
        let config = parse_config("main_branch = \"trunk\"\n").unwrap();
        assert_eq!(config.main_branch, "trunk");
        assert_eq!(config.file, PathBuf::from("VERSION"));
        assert_eq!(config.backend, Backend::Cli);
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
main_branch = "master"
file = "meta/VERSION.txt"
commit_message = "chore(release): {version}"
backend = "libgit2"
"#;
        let config = parse_config(toml_content).unwrap();
        assert_eq!(config.main_branch, "master");
        assert_eq!(config.file, PathBuf::from("meta/VERSION.txt"));
        assert_eq!(config.commit_message, "chore(release): {version}");
        assert_eq!(config.backend, Backend::Libgit2);
    }

    #[test]
    fn test_parse_rejects_unknown_keys() {
        assert!(matches!(
            parse_config("branch = \"main\"\n"),
            Err(BumpError::Config(_))
        ));
    }

    #[test]
    fn test_validate_commit_message_placeholder() {
        let mut config = Config::default();
        config.commit_message = "release".to_string();
        assert!(config.validate().is_err());

        config.commit_message = "{version} and {version}".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_empty_main_branch() {
        let config = Config {
            main_branch: "  ".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_resolve_overrides_take_precedence() {
        let config = Config {
            main_branch: "trunk".to_string(),
            file: PathBuf::from("APP_VERSION"),
            ..Config::default()
        };
        let overrides = CliOverrides {
            file: Some(PathBuf::from("other/VERSION")),
            main_branch: None,
            backend: Some(Backend::Libgit2),
            major: false,
            minor: true,
            dry_run: true,
        };

        let (bump_config, backend) = config.resolve(overrides).unwrap();
        assert_eq!(bump_config.file_path, PathBuf::from("other/VERSION"));
        assert_eq!(bump_config.main_branch, "trunk");
        assert_eq!(bump_config.bump(), VersionBump::Minor);
        assert!(bump_config.dry_run);
        assert_eq!(backend, Backend::Libgit2);
    }

    #[test]
    fn test_commit_message_for() {
        let bump_config = BumpConfig::default();
        assert_eq!(
            bump_config.commit_message_for(&Version::new(1, 2, 4)),
            "release: v1.2.4"
        );
    }

    #[test]
    fn test_load_config_missing_explicit_path() {
        let result = load_config(Some(Path::new("/nonexistent/bumpversion.toml")));
        assert!(matches!(result, Err(BumpError::Config(_))));
    }
}

//! Configuration management for chatmd.
//!
//! Parses `chatmd.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ```toml
//! [render]
//! gfm = true
//! breaks = true
//! smart_punctuation = true
//! linkify = true
//! raw_html = true
//! theme = "styled"
//!
//! [output]
//! wrap_prose = true
//!
//! [copy]
//! feedback_ms = 2000
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override render theme.
    pub theme: Option<Theme>,
    /// Override the prose container wrapper.
    pub wrap_prose: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "chatmd.toml";

/// Upper bound for `copy.feedback_ms`.
const MAX_FEEDBACK_MS: u64 = 60_000;

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Markdown rendering configuration.
    pub render: RenderConfig,
    /// Output assembly configuration.
    pub output: OutputConfig,
    /// Copy control configuration.
    pub copy: CopyConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Render theme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Utility classes, copy buttons and the icon sprite.
    #[default]
    Styled,
    /// Unstyled semantic HTML.
    Plain,
}

/// Markdown rendering configuration.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Tables, strikethrough and task lists.
    pub gfm: bool,
    /// Soft line breaks become `<br>`.
    pub breaks: bool,
    /// Curly quotes, dashes and ellipses.
    pub smart_punctuation: bool,
    /// Bare URLs become links.
    pub linkify: bool,
    /// Pass raw HTML through instead of escaping it.
    pub raw_html: bool,
    /// Output theme.
    pub theme: Theme,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            gfm: true,
            breaks: true,
            smart_punctuation: true,
            linkify: true,
            raw_html: true,
            theme: Theme::Styled,
        }
    }
}

/// Output assembly configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Wrap the fragment in the theme's prose container.
    pub wrap_prose: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { wrap_prose: true }
    }
}

/// Copy control configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CopyConfig {
    /// How long a copied block shows its check icon, in milliseconds.
    pub feedback_ms: u64,
}

impl CopyConfig {
    /// Feedback window as a [`Duration`].
    #[must_use]
    pub fn feedback(&self) -> Duration {
        Duration::from_millis(self.feedback_ms)
    }
}

impl Default for CopyConfig {
    fn default() -> Self {
        Self { feedback_ms: 2000 }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `chatmd.toml` in current directory and parents,
    /// falling back to defaults when none is found.
    ///
    /// CLI settings are applied after loading, allowing CLI arguments to take
    /// precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, or if reading,
    /// parsing or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let discovered = match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound(path.to_path_buf()));
                }
                Some(path.to_path_buf())
            }
            None => std::env::current_dir()
                .ok()
                .and_then(|cwd| Self::discover_from(&cwd)),
        };

        let mut config = match discovered {
            Some(path) => Self::load_from_file(&path)?,
            None => Self::default(),
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Search for config file in `start` and its parents.
    #[must_use]
    pub fn discover_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.is_file() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(theme) = settings.theme {
            self.render.theme = theme;
        }
        if let Some(wrap_prose) = settings.wrap_prose {
            self.output.wrap_prose = wrap_prose;
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ms = self.copy.feedback_ms;
        if ms == 0 {
            return Err(ConfigError::Validation(
                "copy.feedback_ms must be greater than 0".to_owned(),
            ));
        }
        if ms > MAX_FEEDBACK_MS {
            return Err(ConfigError::Validation(format!(
                "copy.feedback_ms cannot exceed {MAX_FEEDBACK_MS}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn write_config(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join(CONFIG_FILENAME);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.render.gfm);
        assert!(config.render.breaks);
        assert!(config.render.smart_punctuation);
        assert!(config.render.linkify);
        assert!(config.render.raw_html);
        assert_eq!(config.render.theme, Theme::Styled);
        assert!(config.output.wrap_prose);
        assert_eq!(config.copy.feedback(), Duration::from_millis(2000));
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.copy.feedback_ms, 2000);
        assert_eq!(config.render.theme, Theme::Styled);
    }

    #[test]
    fn test_parse_render_config() {
        let toml = r#"
[render]
breaks = false
linkify = false
theme = "plain"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert!(!config.render.breaks);
        assert!(!config.render.linkify);
        assert!(config.render.gfm);
        assert_eq!(config.render.theme, Theme::Plain);
    }

    #[test]
    fn test_parse_unknown_theme() {
        let toml = r#"
[render]
theme = "neon"
"#;
        let result: Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_output_and_copy() {
        let toml = r"
[output]
wrap_prose = false

[copy]
feedback_ms = 750
";
        let config: Config = toml::from_str(toml).unwrap();
        assert!(!config.output.wrap_prose);
        assert_eq!(config.copy.feedback(), Duration::from_millis(750));
    }

    #[test]
    fn test_validate_default_config_passes() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_feedback_zero() {
        let mut config = Config::default();
        config.copy.feedback_ms = 0;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("copy.feedback_ms"));
    }

    #[test]
    fn test_validate_feedback_too_long() {
        let mut config = Config::default();
        config.copy.feedback_ms = MAX_FEEDBACK_MS + 1;
        assert!(config.validate().is_err());

        config.copy.feedback_ms = MAX_FEEDBACK_MS;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_apply_cli_settings_theme() {
        let mut config = Config::default();
        let overrides = CliSettings {
            theme: Some(Theme::Plain),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.render.theme, Theme::Plain);
        assert!(config.output.wrap_prose); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_wrap_prose() {
        let mut config = Config::default();
        let overrides = CliSettings {
            wrap_prose: Some(false),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert!(!config.output.wrap_prose);
        assert_eq!(config.render.theme, Theme::Styled); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default();
        config.apply_cli_settings(&CliSettings::default());
        assert_eq!(config.render.theme, Theme::Styled);
        assert!(config.output.wrap_prose);
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "[copy]\nfeedback_ms = 1500\n");

        let config = Config::load(Some(path.as_path()), None).unwrap();

        assert_eq!(config.copy.feedback_ms, 1500);
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        let err = Config::load(Some(path.as_path()), None).unwrap_err();

        assert!(
            matches!(err, ConfigError::NotFound(_)),
            "Expected ConfigError::NotFound, got {err:?}"
        );
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "[render\n");

        let err = Config::load(Some(path.as_path()), None).unwrap_err();

        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_validates() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "[copy]\nfeedback_ms = 0\n");

        let err = Config::load(Some(path.as_path()), None).unwrap_err();

        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_load_applies_cli_settings_over_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "[render]\ntheme = \"plain\"\n");
        let overrides = CliSettings {
            theme: Some(Theme::Styled),
            wrap_prose: Some(false),
        };

        let config = Config::load(Some(path.as_path()), Some(&overrides)).unwrap();

        assert_eq!(config.render.theme, Theme::Styled);
        assert!(!config.output.wrap_prose);
    }

    #[test]
    fn test_discover_in_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "");
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(Config::discover_from(&nested), Some(path));
    }

    #[test]
    fn test_discover_prefers_nearest() {
        let dir = tempfile::tempdir().unwrap();
        write_config(dir.path(), "");
        let nested = dir.path().join("project");
        std::fs::create_dir_all(&nested).unwrap();
        let nearest = write_config(&nested, "");

        assert_eq!(Config::discover_from(&nested), Some(nearest));
    }

    #[test]
    fn test_discover_ignores_directory_named_like_config() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("x");
        std::fs::create_dir_all(nested.join(CONFIG_FILENAME)).unwrap();

        let found = Config::discover_from(&nested);

        assert_ne!(found, Some(nested.join(CONFIG_FILENAME)));
    }
}

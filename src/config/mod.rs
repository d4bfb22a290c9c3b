//! Configuration for the pathquill command-line tool.
//!
//! The engine itself takes no ambient configuration; these settings only
//! shape how the CLI writes its results. Configuration is loaded from a TOML
//! file and overridden by command-line flags.
//!
//! # Example
//!
//! ```
//! use pathquill::config::{Config, OutputFormat};
//!
//! let config = Config::default();
//! assert_eq!(config.indent_size, 2);
//! assert_eq!(config.output_format, OutputFormat::Auto);
//!
//! let custom = Config {
//!     indent_size: 4,
//!     ..Config::default()
//! };
//! assert!(!custom.compact);
//! ```

use serde::{Deserialize, Serialize};

/// Serialization format for CLI output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Same format as the input document.
    #[default]
    Auto,
    Json,
    Yaml,
}

/// Configuration for the pathquill CLI.
///
/// # Fields
///
/// * `indent_size` - Spaces per indentation level in JSON output (default: 2)
/// * `output_format` - `auto`, `json` or `yaml` (default: `auto`)
/// * `create_backup` - Create .bak files before writing in place (default: false)
/// * `compact` - Write JSON on a single line (default: false)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Number of spaces per indentation level
    #[serde(default = "default_indent_size")]
    pub indent_size: usize,

    /// Output format
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Create .bak files before writing in place
    #[serde(default)]
    pub create_backup: bool,

    /// Single-line JSON output
    #[serde(default)]
    pub compact: bool,
}

/// Returns the default indentation size.
fn default_indent_size() -> usize {
    2
}

impl Default for Config {
    fn default() -> Self {
        Self {
            indent_size: default_indent_size(),
            output_format: OutputFormat::Auto,
            create_backup: false,
            compact: false,
        }
    }
}

impl Config {
    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/pathquill/config.toml` on all platforms.
    pub fn config_path() -> Option<std::path::PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("pathquill");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist or can't be read.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Self::default(),
        }
    }

    /// Loads configuration from `path`, falling back to defaults on any error.
    pub fn load_from(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|err| {
                tracing::warn!(path = %path.display(), error = %err, "invalid config, using defaults");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Saves configuration to the default config file.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, path: &std::path::Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str("compact = true").unwrap();
        assert!(config.compact);
        assert_eq!(config.indent_size, 2);
        assert_eq!(config.output_format, OutputFormat::Auto);
    }

    #[test]
    fn test_output_format_lowercase() {
        let config: Config = toml::from_str("output_format = \"yaml\"").unwrap();
        assert_eq!(config.output_format, OutputFormat::Yaml);
    }
}

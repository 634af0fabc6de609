//! Layered configuration
//!
//! `defaults/wikimark.default.toml` is embedded into the crate so documentation and runtime
//! behavior stay in sync. Applications layer their own files and single-key overrides on top
//! of those defaults via [`Loader`] before deserializing into [`WikiConfig`].
//! [`WikiConfig::default`] mirrors the embedded file for callers that never touch disk.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/wikimark.default.toml");

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WikiConfig {
    pub parsing: ParsingConfig,
    pub math: MathConfig,
}

/// Knobs of the line classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsingConfig {
    /// Columns per list nesting level; a tab counts as one level.
    pub list_indent_width: usize,
    pub max_heading_level: u8,
}

/// Knobs of the two math serializers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MathConfig {
    pub inline_open: String,
    pub inline_close: String,
    pub display_open: String,
    pub display_close: String,
    /// Escape `&`, `<` and `>` in delimited output, for embedding in HTML.
    pub escape_html: bool,
    /// `m:jc` value of display equations.
    pub display_justification: String,
    /// Put `xmlns:m` on the root math element.
    pub declare_namespace: bool,
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            list_indent_width: 2,
            max_heading_level: 6,
        }
    }
}

impl Default for MathConfig {
    fn default() -> Self {
        Self {
            inline_open: "\\(".to_string(),
            inline_close: "\\)".to_string(),
            display_open: "$$".to_string(),
            display_close: "$$".to_string(),
            escape_html: true,
            display_justification: "center".to_string(),
            declare_namespace: true,
        }
    }
}

impl ParsingConfig {
    /// Indent width with zero treated as one, so level arithmetic never divides by zero.
    pub fn indent_unit(&self) -> usize {
        self.list_indent_width.max(1)
    }
}

/// Layers user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file, ignored when absent.
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer configuration text, e.g. a section embedded in a larger settings file.
    pub fn with_toml_str(mut self, toml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(toml, FileFormat::Toml));
        self
    }

    /// Apply a single key/value override such as `math.escape_html = false`.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<WikiConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

pub fn load_defaults() -> Result<WikiConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_defaults_match_default_impl() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config, WikiConfig::default());
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("math.escape_html", false)
            .expect("override to apply")
            .set_override("parsing.list_indent_width", 4)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert!(!config.math.escape_html);
        assert_eq!(config.parsing.list_indent_width, 4);
        assert_eq!(config.math.inline_open, "\\(");
    }

    #[test]
    fn layers_toml_text() {
        let config = Loader::new()
            .with_toml_str("[math]\ndisplay_justification = \"left\"\n")
            .build()
            .expect("config to build");
        assert_eq!(config.math.display_justification, "left");
        assert_eq!(config.parsing.max_heading_level, 6);
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let config = Loader::new()
            .with_optional_file("/nonexistent/wikimark.toml")
            .build()
            .expect("config to build");
        assert_eq!(config, WikiConfig::default());
    }

    #[test]
    fn missing_required_file_fails() {
        assert!(Loader::new()
            .with_file("/nonexistent/wikimark.toml")
            .build()
            .is_err());
    }
}

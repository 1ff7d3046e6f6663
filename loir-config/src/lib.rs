//! Shared configuration loader for the loir toolchain.
//!
//! `defaults/loir.default.toml` is embedded into every binary so that docs
//! and runtime behavior stay in sync. Applications layer user-specific files
//! on top of those defaults via [`Loader`] before deserializing into
//! [`LoirConfig`]. The reconstruction API key is deliberately not part of
//! the configuration: it is read from the environment once at startup and
//! passed into the client explicitly.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use loir_codec::CompressMode;
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/loir.default.toml");

/// Top-level configuration consumed by loir applications.
#[derive(Debug, Clone, Deserialize)]
pub struct LoirConfig {
    pub tokens: TokensConfig,
    pub recreate: RecreateConfig,
    pub compress: CompressConfig,
}

/// Tokenizer settings for the report's token counts.
#[derive(Debug, Clone, Deserialize)]
pub struct TokensConfig {
    pub model: String,
}

/// Reconstruction service settings.
#[derive(Debug, Clone, Deserialize)]
pub struct RecreateConfig {
    pub model: String,
    pub api_base: String,
    pub timeout_secs: u64,
}

/// Symbol compression settings.
#[derive(Debug, Clone, Deserialize)]
pub struct CompressConfig {
    pub mode: CompressMode,
}

/// Helper for layering user overrides over the built-in defaults.
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

    /// Apply a single key/value override (useful for CLI flags).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<LoirConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<LoirConfig, ConfigError> {
    Loader::new().build()
}

//! Shared configuration loader for the adoc-gettext toolchain.
//!
//! `defaults/adoc-gettext.default.toml` is embedded into every binary so that
//! docs and runtime behavior stay in sync. Applications layer user-specific
//! files on top of those defaults via [`Loader`] before deserializing into
//! [`GettextConfig`].

use adoc_gettext::catalog::HeaderInfo;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/adoc-gettext.default.toml");

/// Top-level configuration consumed by adoc-gettext applications.
#[derive(Debug, Clone, Deserialize)]
pub struct GettextConfig {
    pub catalog: CatalogConfig,
    pub extract: ExtractConfig,
}

/// Metadata written into generated catalog headers.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    pub package_name: String,
    pub package_version: String,
    pub bugs_email_address: String,
}

impl From<&CatalogConfig> for HeaderInfo {
    fn from(config: &CatalogConfig) -> Self {
        HeaderInfo {
            project_name: config.package_name.clone(),
            project_version: config.package_version.clone(),
            bugs_email_address: if config.bugs_email_address.is_empty() {
                None
            } else {
                Some(config.bugs_email_address.clone())
            },
        }
    }
}

/// Knobs for the extraction pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractConfig {
    pub builtin_attrs: bool,
    pub ignore: Vec<String>,
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

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<GettextConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<GettextConfig, ConfigError> {
    Loader::new().build()
}

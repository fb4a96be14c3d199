//! Shared configuration loader for the rtf tooling.
//!
//! The built-in defaults live in `defaults/rtf.default.toml` and are compiled into the crate.
//! [`Loader`] stacks sources on top of them, later sources winning:
//!
//!     defaults -> configuration files -> RTF_* environment variables -> explicit overrides
//!
//! The merged tree is deserialized into [`RtfConfig`]. Its `tokenizer` section is a
//! [`TokenizerOptions`] and can be handed straight to `Tokenizer::configure`.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat, ValueKind};
use rtf_parser::TokenizerOptions;
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/rtf.default.toml");

/// Top-level configuration consumed by rtf applications.
#[derive(Debug, Clone, Deserialize)]
pub struct RtfConfig {
    pub tokenizer: TokenizerOptions,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

/// How a token stream is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    TokenSimple,
    TokenJson,
    TokenYaml,
    Detokenize,
}

impl OutputFormat {
    pub const NAMES: [&'static str; 4] = ["token-simple", "token-json", "token-yaml", "detokenize"];
}

/// Prefix of environment variables read by [`Loader::with_env`]
pub const ENV_PREFIX: &str = "RTF";

/// Builder stacking configuration sources over the embedded defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        let defaults = File::from_str(DEFAULT_TOML, FileFormat::Toml);
        Self {
            builder: Config::builder().add_source(defaults),
        }
    }

    fn toml_file(mut self, path: &Path, required: bool) -> Self {
        let file = File::from(path).format(FileFormat::Toml).required(required);
        self.builder = self.builder.add_source(file);
        self
    }

    /// Stack a TOML file that must exist.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.toml_file(path.as_ref(), true)
    }

    /// Stack a TOML file if it exists, e.g. a per-user file.
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.toml_file(path.as_ref(), false)
    }

    /// Stack `RTF_*` environment variables, sections separated by `__`
    /// (`RTF_OUTPUT__FORMAT=token-json`).
    pub fn with_env(mut self) -> Self {
        let environment = Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__");
        self.builder = self.builder.add_source(environment);
        self
    }

    /// Force a single key, e.g. from a command line flag.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Merge all sources and deserialize the result.
    pub fn build(self) -> Result<RtfConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// The embedded defaults alone.
pub fn load_defaults() -> Result<RtfConfig, ConfigError> {
    Loader::new().build()
}

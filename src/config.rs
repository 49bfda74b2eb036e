//! Runtime configuration
//!
//! Loaded once at startup and handed to the VM by value. Sources, lowest
//! precedence first:
//!
//! 1. Built-in defaults
//! 2. `spindle.toml` in the working directory (or the file given with `--config`)
//! 3. `SPINDLE__*` environment variables, e.g. `SPINDLE__STRICT_PROCEDURES=true`
//!    or `SPINDLE__PLATFORM__ENDIANNESS=BIG_ENDIAN` (`.env` is read first)

use anyhow::{Context, Result};
use ::config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Endianness {
    BigEndian,
    LittleEndian,
}

impl Endianness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Endianness::BigEndian => "BIG_ENDIAN",
            Endianness::LittleEndian => "LITTLE_ENDIAN",
        }
    }
}

/// Facts about the host consumed by filesystem and serialization code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Platform {
    pub case_sensitive_filenames: bool,
    pub endianness: Endianness,
}

impl Platform {
    /// Platform of the running process
    pub fn detect() -> Self {
        let endianness = if cfg!(target_endian = "big") {
            Endianness::BigEndian
        } else {
            Endianness::LittleEndian
        };
        Platform {
            case_sensitive_filenames: !cfg!(windows),
            endianness,
        }
    }
}

/// Per-field overrides of the detected platform
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformOverrides {
    pub case_sensitive_filenames: Option<bool>,
    pub endianness: Option<Endianness>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// tracing filter directive used when RUST_LOG is unset
    pub log_filter: String,

    /// Advancing a finished procedure raises MisuseError instead of
    /// returning Exhausted
    pub strict_procedures: bool,

    /// Maximum call stack depth
    pub max_frames: usize,

    pub platform: PlatformOverrides,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
            strict_procedures: false,
            max_frames: 1024,
            platform: PlatformOverrides::default(),
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; the default `spindle.toml` is optional.
    pub fn load(path: Option<&str>) -> Result<Self> {
        dotenvy::dotenv().ok();

        let file = match path {
            Some(p) => File::with_name(p).required(true),
            None => File::with_name("spindle").required(false),
        };

        Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix("SPINDLE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to load configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// Detected platform with configured overrides applied
    pub fn platform(&self) -> Platform {
        let detected = Platform::detect();
        Platform {
            case_sensitive_filenames: self
                .platform
                .case_sensitive_filenames
                .unwrap_or(detected.case_sensitive_filenames),
            endianness: self.platform.endianness.unwrap_or(detected.endianness),
        }
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to render configuration")
    }
}

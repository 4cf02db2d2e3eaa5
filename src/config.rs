//! @ai:module:intent Logger parameters and optional TOML configuration
//! @ai:module:layer infrastructure
//! @ai:module:public_api LoggerParameters, LoggerConfig, SourceKind, resolve_output_path, DEFAULT_OUTPUT_FILE
//! @ai:module:depends_on error

use crate::error::{Error, Result};
use crate::paths::non_blank;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Output file used when the host passes no parameters.
pub const DEFAULT_OUTPUT_FILE: &str = "issues.json.log";

/// @ai:intent Semicolon-delimited parameter string handed over by the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerParameters {
    pub output: String,
    pub extra: Vec<String>,
}

impl LoggerParameters {
    /// @ai:intent Split host parameters; the first element names the output file
    /// @ai:example (None) -> issues.json.log
    /// @ai:example (Some("out.log;verbosity=x")) -> out.log, extra ["verbosity=x"]
    /// @ai:effects pure
    pub fn parse(parameters: Option<&str>) -> Self {
        let Some(parameters) = parameters else {
            return Self::default();
        };

        let mut parts = parameters.split(';');
        let output = non_blank(parts.next())
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|| DEFAULT_OUTPUT_FILE.to_string());
        let extra = parts.map(str::to_string).collect();

        Self { output, extra }
    }
}

impl Default for LoggerParameters {
    fn default() -> Self {
        Self {
            output: DEFAULT_OUTPUT_FILE.to_string(),
            extra: Vec::new(),
        }
    }
}

/// @ai:intent Resolve a relative output path against the working directory
/// @ai:effects pure
pub fn resolve_output_path(working_dir: &Path, output: &str) -> PathBuf {
    let output = Path::new(output);
    if output.is_absolute() {
        output.to_path_buf()
    } else {
        working_dir.join(output)
    }
}

/// @ai:intent Diagnostic stream format read by the binary
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// `cargo build --message-format=json` output
    #[default]
    Cargo,
    /// Host diagnostic events, one JSON object per line
    Events,
}

/// @ai:intent Settings for one logger run, loadable from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggerConfig {
    pub parameters: Option<String>,
    pub source: SourceKind,
    pub working_dir: Option<PathBuf>,
    pub fail_on_error: bool,
}

impl LoggerConfig {
    /// @ai:intent Read configuration from a TOML file
    /// @ai:effects fs:read
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// @ai:intent Parse configuration from TOML text
    /// @ai:effects pure
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::loader::LoaderOptions;
use crate::stats::correlation::CorrelationSeed;

// ---------------------------------------------------------------------------
// Analysis configuration
// ---------------------------------------------------------------------------

/// How a report is printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Settings shared by every file of a run.
///
/// Loaded from an optional JSON file, e.g.
///
/// ```json
/// { "delimiter": ";", "correlation_seed": "legacy", "output": "json" }
/// ```
///
/// Missing keys keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Field separator of the input tables.
    pub delimiter: char,
    /// Starting value of the correlation numerator.
    pub correlation_seed: CorrelationSeed,
    pub output: OutputFormat,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            correlation_seed: CorrelationSeed::Zero,
            output: OutputFormat::Text,
        }
    }
}

impl AnalysisConfig {
    /// Read and validate a JSON configuration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config: AnalysisConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// The delimiter must fit in one byte for the CSV reader.
    pub fn validate(&self) -> Result<()> {
        if !self.delimiter.is_ascii() {
            bail!("delimiter {:?} is not an ASCII character", self.delimiter);
        }
        if self.delimiter == '"' || self.delimiter == '\n' || self.delimiter == '\r' {
            bail!("delimiter {:?} cannot be used as a field separator", self.delimiter);
        }
        Ok(())
    }

    pub fn loader_options(&self) -> LoaderOptions {
        let mut buf = [0u8; 4];
        // validate() guarantees a single byte; anything else falls back to ','.
        let delimiter = match self.delimiter.encode_utf8(&mut buf).as_bytes() {
            [b] => *b,
            _ => b',',
        };
        LoaderOptions { delimiter }
    }
}

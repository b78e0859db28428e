//! Descriptive statistics, correlation and polynomial least-squares fits for
//! two-column numeric tables.
//!
//! ```text
//!  loader ──► Dataset ──┬──► stats       ──┐
//!                       └──► regression  ──┴──► report
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod pipeline;
pub mod regression;
pub mod report;
pub mod stats;

pub use config::{AnalysisConfig, OutputFormat};
pub use data::model::Dataset;
pub use error::{AnalysisError, Result};
pub use report::Report;

use std::path::Path;

use crate::config::AnalysisConfig;
use crate::data::loader::load_file;
use crate::data::model::Dataset;
use crate::error::Result;
use crate::regression::fit_all;
use crate::report::Report;
use crate::stats::StatisticsSummary;

// ---------------------------------------------------------------------------
// Dataset → Report
// ---------------------------------------------------------------------------

/// Run statistics and all three fits on `dataset` and assemble the report.
///
/// Statistics errors are returned; fit errors are kept per degree inside the
/// report.
pub fn analyze(dataset: &Dataset, config: &AnalysisConfig) -> Result<Report> {
    let summary = StatisticsSummary::compute(dataset, config.correlation_seed)?;
    let fits = fit_all(dataset.x(), dataset.y());
    Ok(Report::assemble(dataset, &summary, fits))
}

/// Load the table at `path` and analyze it.
pub fn analyze_file(path: &Path, config: &AnalysisConfig) -> Result<Report> {
    let dataset = load_file(path, &config.loader_options())?;
    analyze(&dataset, config)
}

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};

use super::model::Dataset;
use crate::error::{AnalysisError, Result};

/// Extensions accepted by [`load_file`].
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["csv", "tsv", "txt"];

// ---------------------------------------------------------------------------
// Loader options
// ---------------------------------------------------------------------------

/// Parsing options for a delimited two-column table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderOptions {
    /// Single-byte field separator.
    pub delimiter: u8,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a dataset from a delimited text file.
///
/// Expected layout:
///
/// ```text
/// height, weight
/// 1.5, 2.5
/// 1.6, 27.9
/// ```
///
/// The first row holds the two variable labels; every following row holds
/// exactly two finite numbers. A single offending row rejects the whole file.
pub fn load_file(path: &Path, options: &LoaderOptions) -> Result<Dataset> {
    let file = File::open(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => AnalysisError::InputNotFound {
            path: path.to_path_buf(),
        },
        _ => AnalysisError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    if !SUPPORTED_EXTENSIONS.contains(&ext.as_str()) {
        return Err(AnalysisError::UnsupportedFormat {
            path: path.to_path_buf(),
        });
    }

    let dataset = parse_table(file, options, path)?;
    log::info!(
        "Loaded {} rows of ({}, {}) from {}",
        dataset.len(),
        dataset.x_label(),
        dataset.y_label(),
        path.display()
    );
    Ok(dataset)
}

/// Parse a dataset from any reader holding delimited text.
pub fn parse_reader<R: Read>(reader: R, options: &LoaderOptions) -> Result<Dataset> {
    parse_table(reader, options, Path::new("<reader>"))
}

// ---------------------------------------------------------------------------
// Table parsing
// ---------------------------------------------------------------------------

fn parse_table<R: Read>(reader: R, options: &LoaderOptions, source: &Path) -> Result<Dataset> {
    // Headers are handled by hand so the label row goes through the same
    // shape checks and line accounting as the data rows.
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .delimiter(options.delimiter)
        .from_reader(reader);

    let mut records = reader.records();

    let header = match records.next() {
        Some(result) => result.map_err(|e| csv_error(e, source))?,
        None => {
            return Err(AnalysisError::MalformedSchema {
                line: 1,
                reason: "missing header row".to_string(),
            })
        }
    };
    let (x_label, y_label) = parse_header(&header)?;

    let mut x = Vec::new();
    let mut y = Vec::new();

    for result in records {
        let record = result.map_err(|e| csv_error(e, source))?;
        let line = line_of(&record);

        if record.len() != 2 {
            return Err(AnalysisError::MalformedSchema {
                line,
                reason: format!("expected 2 fields, found {}", record.len()),
            });
        }

        x.push(parse_value(&record[0], line, &x_label)?);
        y.push(parse_value(&record[1], line, &y_label)?);
    }

    log::debug!("Parsed {} data rows from {}", x.len(), source.display());
    Dataset::new(x_label, y_label, x, y)
}

fn parse_header(record: &StringRecord) -> Result<(String, String)> {
    let line = line_of(record);

    if record.len() != 2 {
        return Err(AnalysisError::MalformedSchema {
            line,
            reason: format!("header must name exactly 2 columns, found {}", record.len()),
        });
    }

    for label in record.iter() {
        if label.is_empty() {
            return Err(AnalysisError::MalformedSchema {
                line,
                reason: "header contains an empty column label".to_string(),
            });
        }
        if label.parse::<f64>().is_ok() {
            return Err(AnalysisError::MalformedSchema {
                line,
                reason: format!("header label '{label}' is a number, expected a variable name"),
            });
        }
    }

    Ok((record[0].to_string(), record[1].to_string()))
}

fn parse_value(field: &str, line: u64, column: &str) -> Result<f64> {
    match field.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(AnalysisError::NonNumericValue {
            line,
            column: column.to_string(),
            value: field.to_string(),
        }),
    }
}

fn line_of(record: &StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}

fn csv_error(err: csv::Error, source: &Path) -> AnalysisError {
    let line = err.position().map(|p| p.line()).unwrap_or(0);
    match err.into_kind() {
        csv::ErrorKind::Io(e) => AnalysisError::Io {
            path: source.to_path_buf(),
            source: e,
        },
        csv::ErrorKind::Utf8 { err, .. } => AnalysisError::MalformedSchema {
            line,
            reason: format!("invalid UTF-8: {err}"),
        },
        other => AnalysisError::MalformedSchema {
            line,
            reason: format!("{other:?}"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_rejects_numeric_labels() {
        let record = StringRecord::from(vec!["1.5", "weight"]);
        assert!(matches!(
            parse_header(&record),
            Err(AnalysisError::MalformedSchema { .. })
        ));

        for label in ["nan", "inf", "-infinity"] {
            let record = StringRecord::from(vec!["time", label]);
            assert!(
                matches!(parse_header(&record), Err(AnalysisError::MalformedSchema { .. })),
                "{label} accepted as a label"
            );
        }
    }

    #[test]
    fn value_rejects_infinity() {
        assert!(parse_value("inf", 2, "x").is_err());
        assert!(parse_value("NaN", 2, "x").is_err());
        assert_eq!(parse_value("-2.5e1", 2, "x").unwrap(), -25.0);
    }
}

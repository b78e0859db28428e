use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};

use rusty_stats::config::{AnalysisConfig, OutputFormat};
use rusty_stats::pipeline::analyze_file;
use rusty_stats::stats::correlation::CorrelationSeed;

const USAGE: &str = "\
usage: rusty-stats [--config FILE] [--delimiter C] [--legacy-correlation] [--json] FILE...

Each FILE is a two-column table: a header row with two variable names,
then rows of two numbers.

  variable 1, variable 2
  1.5, 2.5
  1.6, 27.9";

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

struct Cli {
    config: AnalysisConfig,
    files: Vec<PathBuf>,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Option<Cli>> {
    let mut config_path: Option<PathBuf> = None;
    let mut delimiter: Option<char> = None;
    let mut legacy = false;
    let mut json = false;
    let mut files = Vec::new();

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(None),
            "--config" => {
                let value = args.next().context("--config needs a file path")?;
                config_path = Some(PathBuf::from(value));
            }
            "--delimiter" => {
                let value = args.next().context("--delimiter needs a character")?;
                let mut chars = value.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => delimiter = Some(c),
                    _ if value == "\\t" => delimiter = Some('\t'),
                    _ => bail!("--delimiter expects a single character, got '{value}'"),
                }
            }
            "--legacy-correlation" => legacy = true,
            "--json" => json = true,
            flag if flag.starts_with("--") => bail!("unknown option {flag}"),
            _ => files.push(PathBuf::from(arg)),
        }
    }

    let mut config = match &config_path {
        Some(path) => AnalysisConfig::from_file(path)?,
        None => AnalysisConfig::default(),
    };
    if let Some(c) = delimiter {
        config.delimiter = c;
    }
    if legacy {
        config.correlation_seed = CorrelationSeed::Legacy;
    }
    if json {
        config.output = OutputFormat::Json;
    }
    config.validate()?;

    Ok(Some(Cli { config, files }))
}

// ---------------------------------------------------------------------------
// Per-file processing
// ---------------------------------------------------------------------------

fn process(path: &Path, config: &AnalysisConfig) -> Result<()> {
    let report = analyze_file(path, config)
        .with_context(|| format!("analyzing {}", path.display()))?;

    match config.output {
        OutputFormat::Text => {
            println!("== {}", path.display());
            print!("{report}");
            println!();
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report).context("serializing report")?;
            println!("{json}");
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = match parse_args(std::env::args().skip(1)) {
        Ok(Some(cli)) => cli,
        Ok(None) => {
            println!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("Error: {e:#}\n\n{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    if cli.files.is_empty() {
        eprintln!("Error: please add the path of at least one input table.\n\n{USAGE}");
        return ExitCode::FAILURE;
    }

    // One bad file must not stop the others.
    let mut failed = 0usize;
    for path in &cli.files {
        if let Err(e) = process(path, &cli.config) {
            log::error!("{e:#}");
            eprintln!("Error: {e:#}");
            failed += 1;
        }
    }

    if failed > 0 {
        log::info!("{failed} of {} files failed", cli.files.len());
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

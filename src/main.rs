use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{ArgAction, Parser};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use appliance_probe::data::{unix_now, Evaluation};
use appliance_probe::{Check, Export, FileSource, Report, Settings, SnapshotSource};

#[derive(Parser, Debug)]
#[command(name = "check-appliance", version)]
#[command(about = "Evaluate a NetBackup appliance alerts report for a monitoring scheduler")]
struct Args {
    /// Path to the appliance alerts XML file
    #[arg(long)]
    xmlfile: PathBuf,

    /// What to check: epoch|disks|fans|powers|raidgroups|partitions|fibrechannels|adapters|msdps|temperatures
    #[arg(long, conflicts_with = "enclosure_check")]
    appliance_check: Option<String>,

    /// What to check: disks|fans|powers|temperatures
    #[arg(long)]
    enclosure_check: Option<String>,

    /// Warning watermark in seconds (epoch check)
    #[arg(long, allow_negative_numbers = true)]
    warning: Option<i64>,

    /// Critical watermark in seconds (epoch check)
    #[arg(long, allow_negative_numbers = true)]
    critical: Option<i64>,

    /// Increase log verbosity on stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Settings file supplying default thresholds (also read: APPLIANCE_PROBE_* variables)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Also write the evaluation as JSON to this file
    #[arg(short, long)]
    export: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = err.print();
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            let report = Report::unknown(usage_error(&err));
            println!("{}", report);
            return ExitCode::from(report.exit_code);
        }
    };

    init_logging(args.verbose);

    let report = match run(&args) {
        Ok(report) => report,
        Err(err) => {
            debug!("Check failed: {:?}", err);
            Report::unknown(format!("{:#}", err))
        }
    };

    println!("{}", report);
    ExitCode::from(report.exit_code)
}

/// Load, evaluate and render the requested check.
fn run(args: &Args) -> Result<Report> {
    let check = Check::from_flags(args.appliance_check.as_deref(), args.enclosure_check.as_deref())?;

    let settings = Settings::load(args.config.as_deref())
        .context("Failed to load settings")?
        .with_overrides(args.warning, args.critical);

    let source = FileSource::new(&args.xmlfile);
    debug!(source = source.description(), "Loading snapshot");
    let snapshot = source.load()?;

    let evaluation = check.run(&snapshot, &settings, unix_now())?;

    if let Some(export_path) = &args.export {
        if let Err(err) = export_to_file(export_path, &check, &evaluation) {
            warn!("Export failed: {:#}", err);
        }
    }

    Ok(Report::render(&evaluation))
}

/// Export the evaluation to a JSON file
fn export_to_file(export_path: &Path, check: &Check, evaluation: &Evaluation) -> Result<()> {
    let json = Export::new(check, evaluation).to_json()?;
    std::fs::write(export_path, json)
        .with_context(|| format!("Failed to write {}", export_path.display()))?;
    debug!(path = %export_path.display(), "Exported evaluation");
    Ok(())
}

/// The message part of a clap error on one line, without usage help.
fn usage_error(err: &clap::Error) -> String {
    let rendered = err.to_string();
    let message = rendered
        .lines()
        .take_while(|line| !line.trim().is_empty())
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(" ");
    message
        .strip_prefix("error: ")
        .unwrap_or(&message)
        .to_string()
}

/// Logs go to stderr so stdout carries only the plugin output.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use log_interpolate::config::Settings;
use log_interpolate::error::AppError;
use log_interpolate::logger::{MessageLogger, Severity, TracingSink};
use log_interpolate::message::{Context, Interpolator};
use log_interpolate::telemetry;

/// Interpolate a log message template against a JSON context
#[derive(Debug, Parser)]
#[command(name = "log-interpolate", version, about)]
struct Args {
    /// Message template with {path} placeholders
    template: String,

    /// Context as an inline JSON object
    #[arg(short, long, conflicts_with = "context_file")]
    context: Option<String>,

    /// Read the context JSON from a file, or "-" for stdin
    #[arg(short = 'f', long)]
    context_file: Option<PathBuf>,

    /// Severity label prefixed to the line
    #[arg(short, long)]
    severity: Option<Severity>,

    /// Replace unresolved placeholders with nothing and skip the severity prefix
    #[arg(long)]
    legacy: bool,

    /// Emit through the tracing subscriber instead of printing to stdout
    #[arg(long)]
    emit: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    run(&args).map_err(report)
}

/// Single error report for `main`; nothing is logged on the way out
fn report(e: AppError) -> anyhow::Error {
    let code = e.code();
    anyhow::Error::new(e).context(format!("Interpolation failed [{}]", code))
}

fn run(args: &Args) -> Result<(), AppError> {
    // Load configuration
    let settings = Settings::new()?;
    telemetry::init_tracing(&settings.logging)?;
    tracing::debug!(settings = ?settings.interpolation, "Configuration loaded");

    let interpolator = if args.legacy {
        Interpolator::legacy().with_max_depth(settings.interpolation.max_depth)
    } else {
        settings.interpolator()
    };

    let context = load_context(args)?;
    tracing::debug!(keys = context.len(), "Context loaded");

    if args.emit {
        let logger = MessageLogger::with_interpolator(interpolator, TracingSink);
        logger.log(
            args.severity.unwrap_or(Severity::Info),
            &args.template,
            &context,
        )?;
    } else {
        let line = interpolator.interpolate(
            args.severity.map(Severity::as_str),
            &args.template,
            &context,
        )?;
        println!("{}", line);
    }

    Ok(())
}

fn load_context(args: &Args) -> Result<Context, AppError> {
    let raw = match (&args.context, &args.context_file) {
        (Some(inline), _) => inline.clone(),
        (None, Some(path)) if path.as_os_str() == "-" => io::read_to_string(io::stdin())?,
        (None, Some(path)) => fs::read_to_string(path)?,
        (None, None) => return Ok(Context::new()),
    };

    let json: serde_json::Value = serde_json::from_str(&raw)?;
    Ok(Context::try_from(json)?)
}

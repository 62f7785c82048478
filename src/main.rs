use anyhow::{Context, Result};
use clap::Parser;
use flushscope::classifier::ThresholdConfig;
use flushscope::cli::{Cli, OutputFormat};
use flushscope::config::AnalysisConfig;
use flushscope::{csv_output, json_output, pipeline, report};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Config file (if any) with explicit flags layered on top
fn resolve_config(args: &Cli) -> Result<AnalysisConfig> {
    let base = match &args.config {
        Some(path) => AnalysisConfig::from_file(path)?,
        None => AnalysisConfig::default(),
    };
    Ok(args.apply_overrides(base))
}

/// Single-stream latency summary (--io_log)
fn run_summary(args: &Cli, io_log: &std::path::Path, thresholds: &ThresholdConfig) -> Result<()> {
    let result = pipeline::run_latency_summary(io_log, thresholds)?;

    match args.format {
        OutputFormat::Text => print!("{}", report::render_summary_report(&result)),
        OutputFormat::Json => {
            let json = json_output::JsonOutput::from_summary_report(&result)
                .to_json()
                .context("Failed to serialize JSON report")?;
            println!("{}", json);
        }
        OutputFormat::Csv => print!("{}", csv_output::render_summary_report(&result)),
    }
    Ok(())
}

/// Read/write buffer analysis (--read_log/--write_log)
fn run_buffer(args: &Cli, thresholds: &ThresholdConfig) -> Result<()> {
    let (Some(read_log), Some(write_log)) = (&args.read_log, &args.write_log) else {
        anyhow::bail!("Both --read_log and --write_log are required");
    };

    let config = resolve_config(args)?;
    tracing::debug!(?config, ?thresholds, "resolved analysis config");

    let result = pipeline::run_buffer_analysis(read_log, write_log, thresholds, &config)?;

    match args.format {
        OutputFormat::Text => print!("{}", report::render_buffer_report(&result, args.histogram)),
        OutputFormat::Json => {
            let json = json_output::JsonOutput::from_buffer_report(&result)
                .to_json()
                .context("Failed to serialize JSON report")?;
            println!("{}", json);
        }
        OutputFormat::Csv => print!("{}", csv_output::render_buffer_report(&result)),
    }
    Ok(())
}

fn run(args: Cli) -> Result<()> {
    init_tracing(args.debug);

    let thresholds = ThresholdConfig::new(args.lat_threshold, args.gc_threshold)?;

    match &args.io_log {
        Some(io_log) => run_summary(&args, io_log, &thresholds),
        None => run_buffer(&args, &thresholds),
    }
}

fn main() {
    // Usage errors exit 1; --help and --version exit 0
    let args = match Cli::try_parse() {
        Ok(args) => args,
        Err(err) if !err.use_stderr() => err.exit(),
        Err(err) => {
            let _ = err.print();
            std::process::exit(1);
        }
    };

    if let Err(err) = run(args) {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

mod config;
mod report;

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use nmax_chart::{proof_figure, render_png};
use nmax_core::{Analysis, Constants};

use crate::config::Settings;

#[derive(Parser)]
#[command(
    name = "nmax",
    about = "Segmentation limit N_max and the convergence of effective π"
)]
struct Cli {
    /// TOML settings file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Chart output path (.png), overrides the settings file
    #[arg(long)]
    output: Option<PathBuf>,

    /// Skip rendering the chart
    #[arg(long)]
    no_chart: bool,

    /// Print the analysis as JSON instead of the text report
    #[arg(long)]
    json: bool,

    /// Enable verbose debug output
    #[arg(long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(output) = cli.output {
        settings.output = output;
    }

    let constants = Constants::physical();
    let analysis =
        Analysis::run(&constants, &settings.analysis).context("analysis parameters rejected")?;
    tracing::debug!(
        samples = analysis.samples.len(),
        converged = analysis.convergence.is_converged(),
        "analysis complete"
    );
    if !analysis.convergence.is_converged() {
        tracing::warn!(
            epsilon = analysis.params.epsilon,
            "convergence not reached in the scanned range"
        );
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if cli.json {
        serde_json::to_writer_pretty(&mut out, &analysis).context("failed to write JSON")?;
        writeln!(out)?;
    } else {
        report::write_report(&mut out, &analysis).context("failed to write report")?;
    }
    out.flush()?;

    let chart = if cli.no_chart {
        None
    } else {
        let figure = proof_figure(&analysis);
        render_png(&figure, &settings.chart, &settings.output)
            .with_context(|| format!("failed to render chart {}", settings.output.display()))?;
        if cli.json {
            eprintln!("Plot saved: {}", settings.output.display());
        }
        Some(settings.output.as_path())
    };

    if !cli.json {
        report::write_summary(&mut out, &analysis, chart).context("failed to write summary")?;
    }
    out.flush()?;
    Ok(())
}

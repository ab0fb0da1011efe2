use anyhow::Context;
use clap::Parser;
use flexi_logger::{Logger, LoggerHandle, LogSpecification};
use log::{debug, error, info};
use std::{path::PathBuf, process::ExitCode};

use crate::config::{Config, get_config};
use envdetect::{
    geometry::GeometrySource,
    overflow::overflow_percentage_named,
    report::EnvironmentReport,
    scrollbar::ScrollbarComparator,
    services::{
        geometry::RecordedGeometry,
        platform::{FixedPlatform, HostPlatform, Platform, resolve_platform},
    },
    stabilize::wait_until_stable,
    surface::SurfaceClassifier,
};

mod config;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[arg(short, long, value_parser = clap::value_parser!(PathBuf))]
    config_path: Option<PathBuf>,

    /// Host platform identifier (win, mac, linux, android, ...); overrides the config.
    #[arg(short, long)]
    platform: Option<String>,

    /// Only print the overflow percentage of this axis.
    #[arg(short, long)]
    axis: Option<String>,

    /// Recorded geometry, TOML or JSON.
    #[arg(value_parser = clap::value_parser!(PathBuf))]
    snapshot: PathBuf,
}

pub fn get_log_spec(log_level: &str) -> LogSpecification {
    LogSpecification::env_or_parse(log_level).unwrap_or_else(|err| {
        error!("Failed to parse log level '{log_level}': {err}");
        LogSpecification::default()
    })
}

fn start_logger() -> anyhow::Result<LoggerHandle> {
    Logger::with(get_log_spec("warn"))
        .log_to_stderr()
        .start()
        .context("failed to start logger")
}

async fn platform_for(
    args: &Args,
    config: &Config,
    geometry: &RecordedGeometry,
) -> Option<Platform> {
    let cli = args.platform.clone().map(Platform::from);

    match config.platform_override(cli, geometry.platform()) {
        Some(platform) => {
            resolve_platform(&FixedPlatform(platform), config.platform_timeout()).await
        }
        None => resolve_platform(&HostPlatform, config.platform_timeout()).await,
    }
}

/// Classify a recording and render what should be printed.
async fn detect(args: &Args, config: &Config, geometry: &RecordedGeometry) -> anyhow::Result<String> {
    let platform = platform_for(args, config, geometry).await;

    wait_until_stable(
        geometry,
        config.stabilization.max_retries,
        config.stabilization.delay(),
    )
    .await?;

    let snapshot = geometry.snapshot();
    debug!("Stable geometry: {snapshot:?}");

    if let Some(axis) = &args.axis {
        let percentage = overflow_percentage_named(axis, &snapshot)?;
        return Ok(percentage.to_string());
    }

    let classifier = SurfaceClassifier::new(
        platform,
        ScrollbarComparator::new(config.scroll_tolerance),
    );
    let report = EnvironmentReport::new(&classifier, &snapshot);
    info!(
        "Classified surface as {:?} (popup: {})",
        report.surface, report.is_popup
    );

    Ok(serde_json::to_string_pretty(&report)?)
}

async fn run(args: Args, config: Config) -> anyhow::Result<()> {
    let geometry = RecordedGeometry::load(&args.snapshot)?;
    let output = detect(&args, &config, &geometry).await?;
    println!("{output}");

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    let logger = match start_logger() {
        Ok(logger) => logger,
        Err(err) => {
            eprintln!("{err:#}");
            return ExitCode::FAILURE;
        }
    };

    let (config, config_path) = match get_config(args.config_path.clone()) {
        Ok(config) => config,
        Err(err) => {
            error!("Failed to read config: {err:#}");
            return ExitCode::FAILURE;
        }
    };

    logger.set_new_spec(get_log_spec(&config.log_level));
    info!("Using config {}", config_path.display());

    match run(args, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

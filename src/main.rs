//! memdump-features entrypoint: run Volatility modules against one dump (or every
//! dump in a directory) and append one feature row per dump to a CSV file.

use clap::Parser;
use memdump_features::{
    config::AppConfig,
    error::Error,
    extractors::Registry,
    features::FeatureAggregator,
    logging::StructuredLogger,
    pipeline::{BatchRunner, OutputTarget},
    scan,
    volatility::VolatilityRunner,
};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "memdump-features")]
#[command(about = "Extract statistical features from memory dumps with Volatility")]
#[command(version)]
struct Args {
    /// Path to memory dump file
    memdump: PathBuf,

    /// Path to output CSV file (default: <memdump>.csv)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Name of the volatility executable
    #[arg(short = 'V', long)]
    volatility_exe: Option<String>,

    /// Volatility profile
    #[arg(long)]
    profile: Option<String>,

    /// Process every dump in this directory instead of just MEMDUMP
    #[arg(long)]
    scan_dir: Option<PathBuf>,

    /// JSON configuration file
    #[arg(long, env = "MEMDUMP_FEATURES_CONFIG")]
    config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = Args::parse();
    let config_path = args.config.clone().unwrap_or_else(AppConfig::default_path);
    let mut config = AppConfig::load(&config_path);
    if let Some(exe) = args.volatility_exe {
        config.volatility.exe = exe;
    }
    if let Some(profile) = args.profile {
        config.volatility.profile = profile;
    }

    StructuredLogger::init(config.log.json, &config.log.level);

    if !args.memdump.is_file() {
        return Err(Error::MissingArtifact(args.memdump).into());
    }

    let registry = match &config.modules {
        Some(names) => Registry::select(names.as_slice())?,
        None => Registry::builtin(),
    };
    let artifacts = match &args.scan_dir {
        Some(dir) => scan::find_dumps(dir, &config.scan.extension)?,
        None => vec![args.memdump.clone()],
    };
    let output = args
        .output
        .map(OutputTarget::Fixed)
        .unwrap_or(OutputTarget::PerArtifact);

    info!(
        dumps = artifacts.len(),
        modules = ?registry.names(),
        volatility = %config.volatility.exe,
        profile = %config.volatility.profile,
        "memdump-features starting"
    );

    let stop = Arc::new(AtomicBool::new(false));
    {
        let stop = Arc::clone(&stop);
        if let Err(e) = ctrlc::set_handler(move || stop.store(true, Ordering::Relaxed)) {
            warn!(error = %e, "could not install Ctrl+C handler");
        }
    }

    let aggregator = FeatureAggregator::new(registry, VolatilityRunner::new(config.volatility));
    let summary = BatchRunner::new(aggregator, output)
        .with_stop_flag(stop)
        .run(&artifacts);

    info!(
        written = summary.written.len(),
        failed = summary.failed.len(),
        skipped = summary.skipped,
        "memdump-features finished"
    );
    if !summary.is_success() {
        std::process::exit(1);
    }
    Ok(())
}

//! Batch processing: dumps one at a time, each aggregated then appended to its output.
//! A failed dump is logged and skipped; the batch carries on with the next one.

use crate::error::{Error, Result};
use crate::features::FeatureAggregator;
use crate::output::RowWriter;
use crate::volatility::TableSource;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

/// Where rows go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Every dump appends to the same file
    Fixed(PathBuf),
    /// `<dump path>.csv` next to each dump
    PerArtifact,
}

impl OutputTarget {
    pub fn for_artifact(&self, artifact: &Path) -> PathBuf {
        match self {
            OutputTarget::Fixed(p) => p.clone(),
            OutputTarget::PerArtifact => {
                let mut s = artifact.as_os_str().to_os_string();
                s.push(".csv");
                PathBuf::from(s)
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct BatchSummary {
    /// Dumps whose row was written, with the output file
    pub written: Vec<(PathBuf, PathBuf)>,
    /// Dumps that produced no row, with the reason
    pub failed: Vec<(PathBuf, String)>,
    /// Dumps not attempted because a stop was requested
    pub skipped: usize,
}

impl BatchSummary {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty() && self.skipped == 0
    }
}

pub struct BatchRunner<S> {
    aggregator: FeatureAggregator<S>,
    output: OutputTarget,
    stop: Arc<AtomicBool>,
}

impl<S: TableSource> BatchRunner<S> {
    pub fn new(aggregator: FeatureAggregator<S>, output: OutputTarget) -> Self {
        Self {
            aggregator,
            output,
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Flag checked between dumps; once set, remaining dumps are skipped
    pub fn with_stop_flag(mut self, stop: Arc<AtomicBool>) -> Self {
        self.stop = stop;
        self
    }

    /// Extract and write one dump's row. Nothing is written unless every module succeeded.
    pub fn process(&self, artifact: &Path) -> Result<PathBuf> {
        if !artifact.is_file() {
            return Err(Error::MissingArtifact(artifact.to_path_buf()));
        }
        let output = self.output.for_artifact(artifact);
        info!(artifact = %artifact.display(), output = %output.display(), "extracting features");
        let row = self.aggregator.aggregate(artifact)?;
        RowWriter::new(&output).append(&row)?;
        Ok(output)
    }

    pub fn run(&self, artifacts: &[PathBuf]) -> BatchSummary {
        let mut summary = BatchSummary::default();
        for (i, artifact) in artifacts.iter().enumerate() {
            if self.stop.load(Ordering::Relaxed) {
                summary.skipped = artifacts.len() - i;
                warn!(remaining = summary.skipped, "stop requested; skipping remaining dumps");
                break;
            }
            match self.process(artifact) {
                Ok(output) => {
                    info!(artifact = %artifact.display(), "feature extraction complete");
                    summary.written.push((artifact.clone(), output));
                }
                Err(e) => {
                    warn!(
                        artifact = %artifact.display(),
                        module = e.module().unwrap_or("-"),
                        error = %e,
                        "feature extraction failed; no row written"
                    );
                    summary.failed.push((artifact.clone(), e.to_string()));
                }
            }
        }
        summary
    }
}

//! memdump-features — statistical feature vectors from Volatility memory dump analysis.
//!
//! Modular structure:
//! - [`table`] — Volatility JSON tables decoded into keyed records
//! - [`extractors`] — Per-module feature extractors and their registry
//! - [`features`] — Feature maps, per-dump rows and the aggregator
//! - [`output`] — Append-only CSV output with one-time header
//! - [`volatility`] — Volatility subprocess runner
//! - [`pipeline`] — Sequential batch processing over many dumps
//! - [`scan`] — Dump discovery
//! - [`logging`] — tracing subscriber setup

pub mod config;
pub mod error;
pub mod extractors;
pub mod features;
pub mod logging;
pub mod output;
pub mod pipeline;
pub mod scan;
pub mod table;
pub mod volatility;

pub use config::AppConfig;
pub use error::{Error, Result, TableError};
pub use extractors::{ModuleDescriptor, Registry};
pub use features::{FeatureAggregator, FeatureMap, FeatureRow, FeatureValue};
pub use logging::StructuredLogger;
pub use output::RowWriter;
pub use pipeline::{BatchRunner, BatchSummary, OutputTarget};
pub use table::{RawTable, Record, Value};
pub use volatility::{TableSource, VolatilityRunner};

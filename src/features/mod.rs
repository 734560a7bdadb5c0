//! Named scalar features, per-module feature maps and the merged per-dump row.

mod aggregator;

pub use aggregator::FeatureAggregator;

use crate::error::TableError;
use std::collections::HashSet;
use std::fmt;

/// Column carrying the dump's base file name; always last in the output header
pub const ARTIFACT_COLUMN: &str = "dump_name";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeatureValue {
    Count(u64),
    Ratio(f64),
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureValue::Count(c) => write!(f, "{}", c),
            // keep a decimal point on whole ratios so the column reads as float
            FeatureValue::Ratio(r) if r.is_finite() && r.fract() == 0.0 => write!(f, "{:.1}", r),
            FeatureValue::Ratio(r) => write!(f, "{}", r),
        }
    }
}

/// Features produced by one module, names prefixed `<module>.`
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMap {
    module: &'static str,
    entries: Vec<(String, FeatureValue)>,
}

impl FeatureMap {
    pub fn new(module: &'static str) -> Self {
        Self {
            module,
            entries: Vec::new(),
        }
    }

    pub fn count(&mut self, name: &str, value: u64) -> &mut Self {
        self.push(name, FeatureValue::Count(value))
    }

    pub fn ratio(&mut self, name: &str, value: f64) -> &mut Self {
        self.push(name, FeatureValue::Ratio(value))
    }

    fn push(&mut self, name: &str, value: FeatureValue) -> &mut Self {
        self.entries.push((format!("{}.{}", self.module, name), value));
        self
    }

    /// Lookup by full (`pslist.nproc`) name
    pub fn get(&self, name: &str) -> Option<FeatureValue> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, FeatureValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// All features of one dump, in population order, plus the dump's name
#[derive(Debug, Clone)]
pub struct FeatureRow {
    artifact: String,
    features: Vec<(String, FeatureValue)>,
    names: HashSet<String>,
}

impl FeatureRow {
    pub fn new(artifact: impl Into<String>) -> Self {
        Self {
            artifact: artifact.into(),
            features: Vec::new(),
            names: HashSet::new(),
        }
    }

    /// Append a module's features; a name already present is rejected
    pub fn merge(&mut self, map: FeatureMap) -> Result<(), TableError> {
        for (name, value) in map.entries {
            if !self.names.insert(name.clone()) {
                return Err(TableError::DuplicateFeature(name));
            }
            self.features.push((name, value));
        }
        Ok(())
    }

    pub fn artifact(&self) -> &str {
        &self.artifact
    }

    pub fn get(&self, name: &str) -> Option<FeatureValue> {
        self.features
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }

    pub fn features(&self) -> impl Iterator<Item = (&str, FeatureValue)> {
        self.features.iter().map(|(n, v)| (n.as_str(), *v))
    }

    /// Output columns: feature names, then [`ARTIFACT_COLUMN`]
    pub fn header(&self) -> Vec<String> {
        self.features
            .iter()
            .map(|(n, _)| n.clone())
            .chain(std::iter::once(ARTIFACT_COLUMN.to_string()))
            .collect()
    }

    /// Rendered cell for a header column
    pub fn cell(&self, column: &str) -> Option<String> {
        if column == ARTIFACT_COLUMN {
            return Some(self.artifact.clone());
        }
        self.get(column).map(|v| v.to_string())
    }

    /// Number of features, excluding the artifact column
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

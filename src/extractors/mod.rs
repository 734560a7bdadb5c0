//! Per-module feature extractors and the registry that maps module names to them.
//!
//! Every extractor is a pure function over the decoded records of one Volatility
//! module. The registry is built once and handed to the aggregator by value.

mod handles;
mod injection;
mod kernel;
mod libraries;
mod processes;
mod services;

pub use handles::handles;
pub use injection::malfind;
pub use kernel::{callbacks, modules};
pub use libraries::{dlllist, ldrmodules};
pub use processes::{pslist, psxview};
pub use services::svcscan;

use crate::error::{Error, TableError};
use crate::features::FeatureMap;
use crate::table::{Record, Value};
use std::collections::HashSet;

pub type ExtractFn = fn(&[Record]) -> Result<FeatureMap, TableError>;

#[derive(Debug, Clone, Copy)]
pub struct ModuleDescriptor {
    pub name: &'static str,
    pub extract: ExtractFn,
}

const BUILTIN: [ModuleDescriptor; 9] = [
    ModuleDescriptor { name: "pslist", extract: pslist },
    ModuleDescriptor { name: "dlllist", extract: dlllist },
    ModuleDescriptor { name: "handles", extract: handles },
    ModuleDescriptor { name: "ldrmodules", extract: ldrmodules },
    ModuleDescriptor { name: "malfind", extract: malfind },
    ModuleDescriptor { name: "psxview", extract: psxview },
    ModuleDescriptor { name: "modules", extract: modules },
    ModuleDescriptor { name: "svcscan", extract: svcscan },
    ModuleDescriptor { name: "callbacks", extract: callbacks },
];

/// Fixed, ordered set of modules to run. Iteration order determines header order.
#[derive(Debug, Clone)]
pub struct Registry {
    modules: Vec<ModuleDescriptor>,
}

impl Registry {
    pub fn builtin() -> Self {
        Self {
            modules: BUILTIN.to_vec(),
        }
    }

    /// Keep only `names`, preserving builtin order
    pub fn select<S: AsRef<str>>(names: &[S]) -> Result<Self, Error> {
        for n in names {
            if !BUILTIN.iter().any(|d| d.name == n.as_ref()) {
                return Err(Error::UnknownModule(n.as_ref().to_string()));
            }
        }
        let modules = BUILTIN
            .iter()
            .filter(|d| names.iter().any(|n| n.as_ref() == d.name))
            .copied()
            .collect();
        Ok(Self { modules })
    }

    pub fn get(&self, name: &str) -> Option<&ModuleDescriptor> {
        self.modules.iter().find(|d| d.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModuleDescriptor> {
        self.modules.iter()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.modules.iter().map(|d| d.name).collect()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Number of distinct values in `column`
fn distinct(records: &[Record], column: &str) -> Result<usize, TableError> {
    let mut seen: HashSet<&Value> = HashSet::new();
    for r in records {
        seen.insert(r.get(column)?);
    }
    Ok(seen.len())
}

/// `numerator / denominator`, 0.0 when the denominator is 0
fn per(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

#[cfg(test)]
pub(crate) fn records(value: serde_json::Value) -> Vec<Record> {
    crate::table::RawTable::from_value(value)
        .and_then(|t| t.decode())
        .expect("test table")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_order_is_fixed() {
        assert_eq!(
            Registry::builtin().names(),
            vec![
                "pslist", "dlllist", "handles", "ldrmodules", "malfind", "psxview", "modules",
                "svcscan", "callbacks"
            ]
        );
    }

    #[test]
    fn select_keeps_builtin_order() {
        let r = Registry::select(&["callbacks", "pslist"]).unwrap();
        assert_eq!(r.names(), vec!["pslist", "callbacks"]);
        assert!(r.get("pslist").is_some());
        assert!(r.get("dlllist").is_none());
    }

    #[test]
    fn select_rejects_unknown_module() {
        let err = Registry::select(&["pslist", "netscan"]).unwrap_err();
        assert!(matches!(err, Error::UnknownModule(m) if m == "netscan"));
    }

    #[test]
    fn every_builtin_extractor_handles_its_empty_table() {
        for d in Registry::builtin().iter() {
            let out = (d.extract)(&[]);
            if d.name == "pslist" {
                assert!(out.is_err());
            } else {
                let map = out.unwrap();
                assert!(!map.is_empty(), "{}", d.name);
                assert!(map.iter().all(|(n, _)| n.starts_with(d.name)));
            }
        }
    }
}

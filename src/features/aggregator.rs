//! Per-dump aggregation: for every registered module, fetch → decode → extract → merge.

use super::FeatureRow;
use crate::error::{Error, Result};
use crate::extractors::Registry;
use crate::volatility::TableSource;
use std::path::Path;
use tracing::{debug, info};

pub struct FeatureAggregator<S> {
    registry: Registry,
    source: S,
}

impl<S: TableSource> FeatureAggregator<S> {
    pub fn new(registry: Registry, source: S) -> Self {
        Self { registry, source }
    }

    /// Build the feature row for one dump. The first module that fails aborts
    /// the whole row; the returned error names that module.
    pub fn aggregate(&self, artifact: &Path) -> Result<FeatureRow> {
        let name = artifact
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| artifact.display().to_string());
        let workdir = tempfile::Builder::new()
            .prefix("memdump-features-")
            .tempdir()?;

        let mut row = FeatureRow::new(name);
        for module in self.registry.iter() {
            info!(artifact = %artifact.display(), module = module.name, "executing volatility module");
            let table = self.source.fetch(artifact, module.name, workdir.path())?;
            let records = table
                .decode()
                .map_err(|e| Error::in_module(module.name, e))?;
            let features =
                (module.extract)(&records).map_err(|e| Error::in_module(module.name, e))?;
            debug!(module = module.name, rows = records.len(), features = features.len(), "extracted");
            row.merge(features)
                .map_err(|e| Error::in_module(module.name, e))?;
        }
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TableError;
    use crate::table::RawTable;
    use std::cell::RefCell;
    use std::collections::HashMap;

    struct Fixed {
        tables: HashMap<&'static str, serde_json::Value>,
        calls: RefCell<Vec<String>>,
    }

    impl TableSource for Fixed {
        fn fetch(&self, _artifact: &Path, module: &str, workdir: &Path) -> Result<RawTable> {
            assert!(workdir.is_dir());
            self.calls.borrow_mut().push(module.to_string());
            match self.tables.get(module) {
                Some(v) => RawTable::from_value(v.clone()).map_err(|e| Error::in_module(module, e)),
                None => Err(Error::ExternalTool {
                    module: module.to_string(),
                    status: "exit status: 1".into(),
                    stderr: "plugin crashed".into(),
                }),
            }
        }
    }

    fn fixed(tables: Vec<(&'static str, serde_json::Value)>) -> Fixed {
        Fixed {
            tables: tables.into_iter().collect(),
            calls: RefCell::new(Vec::new()),
        }
    }

    #[test]
    fn row_named_after_file_and_ordered_by_registry() {
        let registry = Registry::select(&["malfind", "modules"]).unwrap();
        let source = fixed(vec![
            ("malfind", serde_json::json!({"columns": ["Pid"], "rows": [[1]]})),
            ("modules", serde_json::json!({"columns": ["Name"], "rows": [["a"], ["b"]]})),
        ]);
        let agg = FeatureAggregator::new(registry, source);
        let row = agg.aggregate(Path::new("/data/host-17.dmp")).unwrap();
        assert_eq!(row.artifact(), "host-17.dmp");
        assert_eq!(
            row.header(),
            vec!["malfind.ninjections", "modules.nmodules", "dump_name"]
        );
    }

    #[test]
    fn failing_module_stops_the_row() {
        let registry = Registry::select(&["malfind", "modules", "callbacks"]).unwrap();
        let source = fixed(vec![(
            "malfind",
            serde_json::json!({"columns": ["Pid"], "rows": []}),
        )]);
        let agg = FeatureAggregator::new(registry, source);
        let err = agg.aggregate(Path::new("x.dmp")).unwrap_err();
        assert_eq!(err.module(), Some("modules"));
        // callbacks never ran
        assert_eq!(*agg.source.calls.borrow(), vec!["malfind", "modules"]);
    }

    #[test]
    fn malformed_table_reports_module() {
        let registry = Registry::select(&["handles"]).unwrap();
        let source = fixed(vec![(
            "handles",
            serde_json::json!({"columns": ["Pid", "Type"], "rows": [[1]]}),
        )]);
        let err = FeatureAggregator::new(registry, source)
            .aggregate(Path::new("x.dmp"))
            .unwrap_err();
        match err {
            Error::Module { module, source: TableError::RowShape { .. } } => {
                assert_eq!(module, "handles")
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}

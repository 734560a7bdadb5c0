//! Open object handles (`handles`).

use super::{distinct, per};
use crate::error::TableError;
use crate::features::FeatureMap;
use crate::table::Record;

pub fn handles(records: &[Record]) -> Result<FeatureMap, TableError> {
    let procs = distinct(records, "Pid")?;
    let mut out = FeatureMap::new("handles");
    out.count("nhandles", records.len() as u64)
        .ratio("avg_handles_per_proc", per(records.len(), procs));
    Ok(out)
}

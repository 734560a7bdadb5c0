//! Loaded DLLs (`dlllist`) and loader-list consistency (`ldrmodules`).

use super::{distinct, per};
use crate::error::TableError;
use crate::features::FeatureMap;
use crate::table::Record;

pub fn dlllist(records: &[Record]) -> Result<FeatureMap, TableError> {
    let procs = distinct(records, "Pid")?;
    let mut out = FeatureMap::new("dlllist");
    out.count("ndlls", records.len() as u64)
        .ratio("avg_dlls_per_proc", per(records.len(), procs));
    Ok(out)
}

/// Modules missing from each of the three PEB loader lists, counted independently
pub fn ldrmodules(records: &[Record]) -> Result<FeatureMap, TableError> {
    let (mut load, mut init, mut mem) = (0u64, 0u64, 0u64);
    for m in records {
        if !m.get("InLoad")?.is_truthy() {
            load += 1;
        }
        if !m.get("InInit")?.is_truthy() {
            init += 1;
        }
        if !m.get("InMem")?.is_truthy() {
            mem += 1;
        }
    }

    let mut out = FeatureMap::new("ldrmodules");
    out.count("not_in_load", load)
        .count("not_in_init", init)
        .count("not_in_mem", mem);
    Ok(out)
}

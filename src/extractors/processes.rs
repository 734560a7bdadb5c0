//! Process list (`pslist`) and cross-view process visibility (`psxview`).

use super::distinct;
use crate::error::TableError;
use crate::features::FeatureMap;
use crate::table::{Record, Value};

/// psxview column → feature counting rows where that view did not see the process
const PSXVIEW_SOURCES: [(&str, &str); 7] = [
    ("pslist", "not_in_pslist"),
    ("psscan", "not_in_eprocess_pool"),
    ("thrdproc", "not_in_ethread_pool"),
    ("pspcid", "not_in_pspcid_list"),
    ("csrss", "not_in_csrss_handles"),
    ("session", "not_in_session"),
    ("deskthrd", "not_in_deskthrd"),
];

/// Process counts and per-process averages.
///
/// An empty process list cannot be averaged and fails with [`TableError::Empty`];
/// a readable memory image always has processes, so an empty list means the
/// plugin output is unusable for this dump.
pub fn pslist(records: &[Record]) -> Result<FeatureMap, TableError> {
    if records.is_empty() {
        return Err(TableError::Empty {
            feature: "pslist.avg_threads",
        });
    }

    let mut threads = 0u64;
    let mut handles = 0u64;
    let mut wow64 = 0u64;
    for p in records {
        threads = add_column(threads, p, "Thds")?;
        handles = add_column(handles, p, "Hnds")?;
        if p.try_get("Wow64").and_then(Value::as_bool) == Some(true) {
            wow64 += 1;
        }
    }

    let n = records.len() as f64;
    let mut out = FeatureMap::new("pslist");
    out.count("nproc", records.len() as u64)
        .count("nppid", distinct(records, "PPID")? as u64)
        .ratio("avg_threads", threads as f64 / n)
        .count("nprocs64bit", wow64)
        .ratio("avg_handlers", handles as f64 / n);
    Ok(out)
}

fn add_column(total: u64, record: &Record, column: &'static str) -> Result<u64, TableError> {
    total
        .checked_add(record.count(column)?)
        .ok_or(TableError::Overflow { column })
}

pub fn psxview(records: &[Record]) -> Result<FeatureMap, TableError> {
    let mut counts = [0u64; PSXVIEW_SOURCES.len()];
    for p in records {
        for (count, (column, _)) in counts.iter_mut().zip(PSXVIEW_SOURCES.iter()) {
            if p.get(column)?.as_bool() == Some(false) {
                *count += 1;
            }
        }
    }

    let mut out = FeatureMap::new("psxview");
    for (count, (_, feature)) in counts.iter().zip(PSXVIEW_SOURCES.iter()) {
        out.count(feature, *count);
    }
    Ok(out)
}

//! Injected code regions (`malfind`). Each row is one suspicious VAD.

use crate::error::TableError;
use crate::features::FeatureMap;
use crate::table::Record;

pub fn malfind(records: &[Record]) -> Result<FeatureMap, TableError> {
    let mut out = FeatureMap::new("malfind");
    out.count("ninjections", records.len() as u64);
    Ok(out)
}

//! Kernel modules (`modules`) and kernel notification callbacks (`callbacks`).

use crate::error::TableError;
use crate::features::FeatureMap;
use crate::table::Record;

pub fn modules(records: &[Record]) -> Result<FeatureMap, TableError> {
    let mut out = FeatureMap::new("modules");
    out.count("nmodules", records.len() as u64);
    Ok(out)
}

/// A callback whose owning module is `UNKNOWN` counts as anonymous only, even
/// when it is also a generic kernel callback.
pub fn callbacks(records: &[Record]) -> Result<FeatureMap, TableError> {
    let (mut anonymous, mut generic) = (0u64, 0u64);
    for c in records {
        if c.text_is("Module", "UNKNOWN")? {
            anonymous += 1;
        } else if c.text_is("Type", "GenericKernelCallback")? {
            generic += 1;
        }
    }

    let mut out = FeatureMap::new("callbacks");
    out.count("n_callbacks", records.len() as u64)
        .count("n_anonymous", anonymous)
        .count("n_generic", generic);
    Ok(out)
}

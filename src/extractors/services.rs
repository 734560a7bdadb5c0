//! Windows service records (`svcscan`).

use crate::error::TableError;
use crate::features::FeatureMap;
use crate::table::Record;

/// `ServiceType` value → bucket feature. Types not listed fall in no bucket.
const SERVICE_BUCKETS: [(&str, &str); 5] = [
    ("SERVICE_KERNEL_DRIVER", "kernel_drivers"),
    ("SERVICE_FILE_SYSTEM_DRIVER", "fs_drivers"),
    ("SERVICE_WIN32_OWN_PROCESS", "process_services"),
    ("SERVICE_WIN32_SHARE_PROCESS", "shared_process_services"),
    ("SERVICE_INTERACTIVE_PROCESS", "interactive_process_services"),
];

const RUNNING: &str = "SERVICE_RUNNING";

pub fn svcscan(records: &[Record]) -> Result<FeatureMap, TableError> {
    let mut buckets = [0u64; SERVICE_BUCKETS.len()];
    let mut active = 0u64;
    for s in records {
        let service_type = s.get("ServiceType")?.as_str();
        if let Some(i) = SERVICE_BUCKETS
            .iter()
            .position(|(ty, _)| Some(*ty) == service_type)
        {
            buckets[i] += 1;
        }
        if s.text_is("State", RUNNING)? {
            active += 1;
        }
    }

    let mut out = FeatureMap::new("svcscan");
    out.count("nservices", records.len() as u64);
    for (count, (_, feature)) in buckets.iter().zip(SERVICE_BUCKETS.iter()) {
        out.count(feature, *count);
    }
    out.count("nactive", active);
    Ok(out)
}

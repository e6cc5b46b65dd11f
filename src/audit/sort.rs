//! Normalize-and-sort over an untrusted fetch result.
//! Used by: renderer.

use serde_json::Value;

use crate::audit::record::AuditRecord;

/// Returns `None` when there is nothing to render: the input is not an
/// array, or the array is empty. Otherwise returns the normalized records,
/// newest first. Equal keys keep their input order.
pub fn normalize_and_sort(input: &Value) -> Option<Vec<AuditRecord>> {
    let items = input.as_array().filter(|items| !items.is_empty())?;
    let mut records: Vec<AuditRecord> = items.iter().map(AuditRecord::from_value).collect();
    records.sort_by(|a, b| b.sort_key().cmp(&a.sort_key()));
    Some(records)
}

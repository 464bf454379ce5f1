//! Version resolution.
//!
//! Posts can share an identifier, meaning they are revisions of the same
//! logical content. The resolver marks the most recent revision in each
//! group as `latest` and stamps every member with the group size.
//!
//! Tie-break: when two revisions share a date, the record from the
//! lexicographically-earliest source path wins `latest`. The input is
//! sorted by source path before the version sort, and the version sort is
//! stable, so the result never depends on filesystem traversal order.

use crate::types::ContentRecord;
use std::collections::HashMap;

/// Populate `versions` and `latest` across the whole record set.
///
/// Pure function: consumes the unordered set, returns it annotated, with no
/// other fields touched. Records without an identifier are singletons —
/// they never merge with each other.
pub fn resolve(mut records: Vec<ContentRecord>) -> Vec<ContentRecord> {
    let mut counts: HashMap<String, u32> = HashMap::new();
    for rec in &records {
        if let Some(id) = &rec.identifier {
            *counts.entry(id.clone()).or_insert(0) += 1;
        }
    }

    // Deterministic base order, then cluster groups with the most recent
    // revision first. Both sorts are stable, so equal-date revisions keep
    // source-path order.
    records.sort_by(|a, b| a.source.cmp(&b.source));
    records.sort_by(|a, b| {
        (b.identifier.as_deref(), b.date).cmp(&(a.identifier.as_deref(), a.date))
    });

    let mut prev_id: Option<String> = None;
    for rec in &mut records {
        match &rec.identifier {
            Some(id) => {
                rec.versions = counts[id];
                rec.latest = prev_id.as_deref() != Some(id);
                prev_id = Some(id.clone());
            }
            None => {
                rec.versions = 1;
                rec.latest = true;
                prev_id = None;
            }
        }
    }

    records
}

//! Actuation reconciliation
//!
//! Pure set difference over dedup keys: no I/O, no hidden state,
//! identical inputs always yield identical outputs.

use std::collections::HashSet;

use shared::models::ActuationKey;
use shared::registry::SnapshotActuation;

/// Isolate the genuinely new actuations from a fetched snapshot.
///
/// Keeps the order of `incoming`; the caller may sort beforehand but no
/// reordering happens here. Repeated keys inside `incoming` itself are
/// collapsed to their first occurrence, so one fetch can never yield the
/// same event twice.
pub fn reconcile(
    existing: &HashSet<ActuationKey>,
    incoming: &[SnapshotActuation],
) -> Vec<SnapshotActuation> {
    let mut seen_in_batch: HashSet<ActuationKey> = HashSet::new();

    incoming
        .iter()
        .filter(|actuation| {
            let key = actuation.key();
            !existing.contains(&key) && seen_in_batch.insert(key)
        })
        .cloned()
        .collect()
}

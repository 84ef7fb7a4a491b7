//! Last-value-per-bucket aggregation shared by charts and growth
//!
//! Entries are cumulative snapshots. Summing every entry in a bucket would
//! count the same running total several times, so each bucket keeps only the
//! latest snapshot per performer and sums those.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use crate::dataset::MetricEntry;

/// Sum of the latest snapshot per performer, for each bucket
///
/// `bucket_of` maps an entry to its bucket key. Untagged entries share a
/// single performer slot. Within a slot the entry with the lexicographically
/// largest `datetime` wins; equal timestamps keep the larger value, so the
/// result does not depend on input order. Buckets come back ascending.
pub fn latest_per_bucket<'a, I, F>(entries: I, bucket_of: F) -> BTreeMap<&'a str, f64>
where
    I: IntoIterator<Item = &'a MetricEntry>,
    F: Fn(&'a MetricEntry) -> &'a str,
{
    let mut buckets: BTreeMap<&'a str, BTreeMap<Option<&'a str>, &'a MetricEntry>> =
        BTreeMap::new();

    for entry in entries {
        let performers = buckets.entry(bucket_of(entry)).or_default();
        match performers.entry(entry.performer.as_deref()) {
            Entry::Vacant(slot) => {
                slot.insert(entry);
            }
            Entry::Occupied(mut slot) => {
                if supersedes(entry, slot.get()) {
                    slot.insert(entry);
                }
            }
        }
    }

    buckets
        .into_iter()
        .map(|(bucket, performers)| (bucket, performers.values().map(|e| e.value).sum()))
        .collect()
}

fn supersedes(candidate: &MetricEntry, current: &MetricEntry) -> bool {
    match candidate.datetime.cmp(&current.datetime) {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => candidate.value.total_cmp(&current.value) == Ordering::Greater,
    }
}

//! Tests for last-value-per-bucket aggregation

use crate::bucket::latest_per_bucket;
use crate::dataset::MetricEntry;
use crate::period::date_part;

fn by_date(entries: &[MetricEntry]) -> Vec<(String, f64)> {
    latest_per_bucket(entries, |e| date_part(&e.datetime))
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

#[test]
fn test_empty() {
    assert!(by_date(&[]).is_empty());
}

#[test]
fn test_same_performer_keeps_latest_snapshot() {
    let entries = vec![
        MetricEntry::for_performer(100.0, "2026-01-01T00:00:00Z", "A"),
        MetricEntry::for_performer(150.0, "2026-01-01T12:00:00Z", "A"),
    ];

    assert_eq!(by_date(&entries), vec![("2026-01-01".to_string(), 150.0)]);
}

#[test]
fn test_latest_wins_regardless_of_order() {
    let entries = vec![
        MetricEntry::for_performer(150.0, "2026-01-01T12:00:00Z", "A"),
        MetricEntry::for_performer(100.0, "2026-01-01T00:00:00Z", "A"),
    ];

    assert_eq!(by_date(&entries), vec![("2026-01-01".to_string(), 150.0)]);
}

#[test]
fn test_performers_are_summed() {
    let entries = vec![
        MetricEntry::for_performer(100.0, "2026-01-01T10:00:00Z", "A"),
        MetricEntry::for_performer(50.0, "2026-01-01T11:00:00Z", "B"),
        MetricEntry::for_performer(55.0, "2026-01-01T20:00:00Z", "B"),
    ];

    assert_eq!(by_date(&entries), vec![("2026-01-01".to_string(), 155.0)]);
}

#[test]
fn test_untagged_entries_share_one_slot() {
    let entries = vec![
        MetricEntry::new(10.0, "2026-01-01T01:00:00Z"),
        MetricEntry::new(20.0, "2026-01-01T02:00:00Z"),
        MetricEntry::for_performer(5.0, "2026-01-01T03:00:00Z", "A"),
    ];

    assert_eq!(by_date(&entries), vec![("2026-01-01".to_string(), 25.0)]);
}

#[test]
fn test_buckets_sorted_ascending() {
    let entries = vec![
        MetricEntry::for_performer(3.0, "2026-01-03T00:00:00Z", "A"),
        MetricEntry::for_performer(1.0, "2026-01-01T00:00:00Z", "A"),
        MetricEntry::for_performer(2.0, "2026-01-02T00:00:00Z", "A"),
    ];

    let dates: Vec<String> = by_date(&entries).into_iter().map(|(d, _)| d).collect();
    assert_eq!(dates, vec!["2026-01-01", "2026-01-02", "2026-01-03"]);
}

#[test]
fn test_equal_timestamps_resolve_deterministically() {
    let forward = vec![
        MetricEntry::for_performer(10.0, "2026-01-01T00:00:00Z", "A"),
        MetricEntry::for_performer(12.0, "2026-01-01T00:00:00Z", "A"),
    ];
    let mut backward = forward.clone();
    backward.reverse();

    assert_eq!(by_date(&forward), by_date(&backward));
    assert_eq!(by_date(&forward), vec![("2026-01-01".to_string(), 12.0)]);
}

#[test]
fn test_performer_names_with_separators_do_not_collide() {
    // A composite string key like "bucket|performer" would merge these
    let entries = vec![
        MetricEntry::for_performer(1.0, "2026-01-01T00:00:00Z", "A|B"),
        MetricEntry::for_performer(2.0, "2026-01-01T00:00:00Z", "A"),
    ];

    assert_eq!(by_date(&entries), vec![("2026-01-01".to_string(), 3.0)]);
}

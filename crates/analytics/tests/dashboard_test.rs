//! End-to-end tests over a full dashboard payload
//!
//! Mirrors how the dashboard uses the crate: decode the API payload once,
//! then derive charts, growth badges and breakdowns for each filter change.

use chrono::{DateTime, TimeZone, Utc};
use reach_analytics::{
    ChartCache, ChartDataPoint, Dashboard, FilterState, Growth, Metric, Period, Platform,
    aggregate_platform, build_chart_points_at, calculate_growth_at, dataset_version,
    performer_breakdown,
};

const PAYLOAD: &str = r#"{
    "Artist A": {
        "youtube": {
            "followers": { "latest": 120, "entries": [
                { "value": 100, "datetime": "2026-01-01T08:00:00Z" },
                { "value": 110, "datetime": "2026-01-01T20:00:00Z" },
                { "value": 120, "datetime": "2026-01-02T08:00:00Z" }
            ] }
        },
        "spotify": {
            "monthly_listeners": { "latest": 900, "entries": [
                { "value": 0, "datetime": "2026-01-01T08:00:00Z" },
                { "value": 900, "datetime": "2026-01-02T08:00:00Z" }
            ] }
        }
    },
    "Artist B": {
        "youtube": {
            "followers": { "latest": 60, "entries": [
                { "value": 50, "datetime": "2026-01-01T09:00:00Z" },
                { "value": 60, "datetime": "2026-01-02T09:00:00Z" }
            ] }
        }
    },
    "total": {
        "youtube": {
            "followers": { "latest": 180, "entries": [
                { "value": 100, "datetime": "2026-01-01T08:00:00Z", "performer": "Artist A" },
                { "value": 110, "datetime": "2026-01-01T20:00:00Z", "performer": "Artist A" },
                { "value": 50,  "datetime": "2026-01-01T09:00:00Z", "performer": "Artist B" },
                { "value": 120, "datetime": "2026-01-02T08:00:00Z", "performer": "Artist A" },
                { "value": 60,  "datetime": "2026-01-02T09:00:00Z", "performer": "Artist B" }
            ] }
        },
        "spotify": {
            "monthly_listeners": { "latest": 900, "entries": [
                { "value": 0, "datetime": "2026-01-01T08:00:00Z", "performer": "Artist A" },
                { "value": 900, "datetime": "2026-01-02T08:00:00Z", "performer": "Artist A" }
            ] }
        }
    }
}"#;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 2, 18, 0, 0).unwrap()
}

fn dashboard() -> Dashboard {
    Dashboard::from_json(PAYLOAD).expect("payload should decode")
}

#[test]
fn test_chart_for_all_performers() {
    let filter = FilterState::new(Period::SevenDays);
    let query = filter.chart_query(Platform::Youtube, Metric::Followers);

    let points = build_chart_points_at(&dashboard(), &query, now());

    assert_eq!(
        points,
        vec![
            ChartDataPoint::new("2026-01-01", 160.0),
            ChartDataPoint::new("2026-01-02", 180.0).with_previous(160.0),
        ]
    );
}

#[test]
fn test_chart_for_one_performer() {
    let filter = FilterState::new(Period::SevenDays).with_performers(["Artist B"]);
    let query = filter.chart_query(Platform::Youtube, Metric::Followers);

    let values: Vec<f64> = build_chart_points_at(&dashboard(), &query, now())
        .into_iter()
        .map(|p| p.value)
        .collect();

    assert_eq!(values, vec![50.0, 60.0]);
}

#[test]
fn test_growth_matches_between_total_and_selection() {
    let dashboard = dashboard();

    let total = dashboard
        .metric(Platform::Youtube, Metric::Followers)
        .unwrap();
    let from_total = calculate_growth_at(&total.entries, Period::SevenDays, now());

    let selected = vec!["Artist A".to_string(), "Artist B".to_string()];
    let merged = aggregate_platform(&dashboard, Platform::Youtube, &selected).unwrap();
    let from_selection = calculate_growth_at(
        &merged.get(Metric::Followers).unwrap().entries,
        Period::SevenDays,
        now(),
    );

    assert_eq!(from_total.absolute, 20.0);
    assert_eq!(from_total, from_selection);
}

#[test]
fn test_growth_from_zero_baseline() {
    let dashboard = dashboard();
    let listeners = dashboard
        .metric(Platform::Spotify, Metric::MonthlyListeners)
        .unwrap();

    let growth = calculate_growth_at(&listeners.entries, Period::ThirtyDays, now());

    assert_eq!(
        growth,
        Growth {
            absolute: 900.0,
            percent: 0.0
        }
    );
}

#[test]
fn test_breakdown() {
    let breakdown = performer_breakdown(&dashboard(), Platform::Youtube, Metric::Followers, &[]);

    assert_eq!(breakdown.total, 180.0);
    assert_eq!(breakdown.shares[0].performer, "Artist A");
    assert_eq!(breakdown.shares[1].performer, "Artist B");
}

#[test]
fn test_cached_series_matches_fresh_build() {
    let dashboard = dashboard();
    let cache = ChartCache::default();
    let version = dataset_version(PAYLOAD.as_bytes());

    for period in Period::ALL {
        let query = FilterState::new(period).chart_query(Platform::Youtube, Metric::Followers);
        let cached = cache.get_or_build(version, &dashboard, &query, now());
        assert_eq!(*cached, build_chart_points_at(&dashboard, &query, now()));
    }
}

#[test]
fn test_missing_data_degrades_to_empty() {
    let dashboard = dashboard();
    let query = FilterState::new(Period::Today).chart_query(Platform::Instagram, Metric::PostCount);

    assert!(build_chart_points_at(&dashboard, &query, now()).is_empty());
    assert!(aggregate_platform(&dashboard, Platform::Instagram, &[]).is_none());
}

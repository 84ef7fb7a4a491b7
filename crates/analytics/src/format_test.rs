//! Tests for value formatting

use crate::format::{format_compact_number, format_percent};

#[test]
fn test_compact_small_values() {
    assert_eq!(format_compact_number(0.0), "0");
    assert_eq!(format_compact_number(999.0), "999");
    assert_eq!(format_compact_number(12.5), "12.5");
}

#[test]
fn test_compact_thousands() {
    assert_eq!(format_compact_number(1_000.0), "1K");
    assert_eq!(format_compact_number(48_300.0), "48K");
}

#[test]
fn test_compact_millions_and_billions() {
    assert_eq!(format_compact_number(1_500_000.0), "1.5M");
    assert_eq!(format_compact_number(2_000_000_000.0), "2.0B");
}

#[test]
fn test_compact_negative() {
    assert_eq!(format_compact_number(-2_000.0), "-2K");
    assert_eq!(format_compact_number(-30.0), "-30");
}

#[test]
fn test_compact_non_finite() {
    assert_eq!(format_compact_number(f64::NAN), "-");
    assert_eq!(format_compact_number(f64::INFINITY), "-");
}

#[test]
fn test_percent() {
    assert_eq!(format_percent(20.0, 2), "+20.00%");
    assert_eq!(format_percent(-5.24, 1), "-5.2%");
    assert_eq!(format_percent(0.0, 1), "+0.0%");
    assert_eq!(format_percent(f64::NAN, 1), "-");
}

#![cfg(feature = "integration-tests")]

use solsys_catalog::SourceRecordSet;

// A DP0.3 object with a long observation history.
const TEST_OBJECT_ID: i64 = 8404051942;

#[test]
fn test_fetch_with_join() {
    let records = SourceRecordSet::fetch(TEST_OBJECT_ID).expect("Failed to fetch records");

    assert!(!records.is_empty(), "Expected at least one detection");
    assert_eq!(records.heliocentric_dist().unwrap().len(), records.len());
    assert_eq!(records.mid_times().unwrap().len(), records.len());

    for rh in records.heliocentric_dist().unwrap() {
        assert!(rh > 0.0 && rh < 100.0, "Implausible heliocentric distance");
    }
}

#[test]
fn test_fetch_without_join() {
    let records =
        SourceRecordSet::fetch_with(TEST_OBJECT_ID, false).expect("Failed to fetch records");

    assert!(!records.is_empty(), "Expected at least one source row");
    assert_eq!(records.phase_angle().unwrap().len(), records.len());
}

#[test]
fn test_row_slicing_on_live_data() {
    let records = SourceRecordSet::fetch(TEST_OBJECT_ID).expect("Failed to fetch records");
    let first = records.row(0).expect("Expected a first row");

    assert_eq!(first.len(), 1);
    assert_eq!(
        first.heliocentric_dist().unwrap()[0],
        records.heliocentric_dist().unwrap()[0]
    );
}

//! Ordering and conflict-detection tests for the priority index.

use crate::tracker::domain::{ItemId, PriorityIndex, Schedule};
use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use rstest::rstest;

fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 10, 23, 18, 0, 0)
        .single()
        .expect("valid timestamp")
}

fn window(offset_minutes: i64, length_minutes: i64) -> Schedule {
    Schedule::new(
        base() + TimeDelta::minutes(offset_minutes),
        TimeDelta::minutes(length_minutes),
    )
    .expect("valid window")
}

fn id(value: u32) -> ItemId {
    ItemId::new(value)
}

#[rstest]
fn ids_come_back_in_start_order() {
    let mut index = PriorityIndex::new();
    index.insert(id(3), window(40, 10));
    index.insert(id(1), window(0, 10));
    index.insert(id(2), window(20, 10));

    assert_eq!(index.ids(), vec![id(1), id(2), id(3)]);
}

#[rstest]
fn equal_starts_tie_break_by_id() {
    let mut index = PriorityIndex::new();
    index.insert(id(9), window(0, 0));
    index.insert(id(4), window(0, 0));

    assert_eq!(index.ids(), vec![id(4), id(9)]);
}

#[rstest]
fn duplicate_id_is_rejected() {
    let mut index = PriorityIndex::new();
    assert!(index.insert(id(1), window(0, 10)));
    assert!(!index.insert(id(1), window(60, 10)));

    assert_eq!(index.window(id(1)), Some(window(0, 10)));
    assert_eq!(index.len(), 1);
}

#[rstest]
fn remove_then_insert_repositions_an_entry() {
    let mut index = PriorityIndex::new();
    index.insert(id(1), window(0, 10));
    index.insert(id(2), window(20, 10));
    index.remove(id(1));
    index.insert(id(1), window(40, 10));

    assert_eq!(index.ids(), vec![id(2), id(1)]);
}

#[rstest]
fn remove_of_untracked_id_is_a_no_op() {
    let mut index = PriorityIndex::new();
    index.insert(id(1), window(0, 10));
    index.remove(id(2));

    assert_eq!(index.len(), 1);
}

#[rstest]
fn conflict_scan_detects_overlap() {
    let mut index = PriorityIndex::new();
    index.insert(id(1), window(0, 10));
    index.insert(id(2), window(20, 20));

    assert!(index.conflicts_with(&window(5, 5), None));
    assert!(index.conflicts_with(&window(30, 60), None));
    assert!(!index.conflicts_with(&window(10, 10), None));
}

#[rstest]
fn conflict_scan_skips_the_excluded_id() {
    let mut index = PriorityIndex::new();
    index.insert(id(1), window(0, 10));

    assert!(index.conflicts_with(&window(5, 5), None));
    assert!(!index.conflicts_with(&window(5, 5), Some(id(1))));
}

#[rstest]
fn empty_index_never_conflicts() {
    let index = PriorityIndex::new();
    assert!(index.is_empty());
    assert!(!index.conflicts_with(&window(0, 600), None));
}

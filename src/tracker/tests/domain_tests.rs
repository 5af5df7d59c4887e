//! Domain-focused tests for statuses, scheduling windows, and aggregation.

use crate::tracker::domain::{
    EpicWindow, ItemKind, ParseStatusError, Schedule, ScheduleError, Status,
};
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

#[rstest]
#[case(&[], Status::New)]
#[case(&[Status::New], Status::New)]
#[case(&[Status::New, Status::New], Status::New)]
#[case(&[Status::Done], Status::Done)]
#[case(&[Status::Done, Status::Done], Status::Done)]
#[case(&[Status::New, Status::Done], Status::InProgress)]
#[case(&[Status::InProgress], Status::InProgress)]
#[case(&[Status::Done, Status::InProgress, Status::Done], Status::InProgress)]
#[case(&[Status::New, Status::InProgress], Status::InProgress)]
fn status_aggregate_partitions_three_ways(#[case] statuses: &[Status], #[case] expected: Status) {
    assert_eq!(Status::aggregate(statuses.iter().copied()), expected);
}

#[rstest]
fn status_round_trips_through_wire_form() {
    for status in [Status::New, Status::InProgress, Status::Done] {
        assert_eq!(Status::try_from(status.as_str()), Ok(status));
    }
}

#[rstest]
fn status_rejects_unknown_wire_form() {
    assert_eq!(
        Status::try_from("CANCELLED"),
        Err(ParseStatusError("CANCELLED".to_owned()))
    );
}

#[rstest]
fn item_kind_round_trips_through_wire_form() {
    for kind in [ItemKind::Task, ItemKind::Epic, ItemKind::Subtask] {
        assert_eq!(ItemKind::try_from(kind.as_str()), Ok(kind));
    }
}

#[rstest]
fn schedule_rejects_negative_duration() {
    let result = Schedule::new(base(), TimeDelta::minutes(-5));
    assert_eq!(
        result,
        Err(ScheduleError::NegativeDuration(TimeDelta::minutes(-5)))
    );
}

#[rstest]
fn schedule_derives_end_from_start_and_duration() {
    let schedule = window(0, 45);
    assert_eq!(schedule.end(), base() + TimeDelta::minutes(45));
}

#[rstest]
#[case(window(0, 10), window(5, 10), true)]
#[case(window(0, 10), window(10, 10), false)]
#[case(window(0, 30), window(5, 5), true)]
#[case(window(0, 10), window(20, 10), false)]
#[case(window(5, 0), window(0, 30), false)]
fn schedule_overlap_is_strict_and_symmetric(
    #[case] first: Schedule,
    #[case] second: Schedule,
    #[case] expected: bool,
) {
    assert_eq!(first.overlaps(&second), expected);
    assert_eq!(second.overlaps(&first), expected);
}

#[rstest]
fn epic_window_aggregates_min_start_max_end_summed_duration() {
    let first = window(0, 10);
    let second = window(60, 30);
    let aggregate =
        EpicWindow::aggregate([&first, &second]).expect("two scheduled children give a window");

    assert_eq!(aggregate.start(), base());
    assert_eq!(aggregate.end(), base() + TimeDelta::minutes(90));
    // Duration is the summed work, not the span: the hour-long gap between
    // the children is not counted.
    assert_eq!(aggregate.duration(), TimeDelta::minutes(40));
}

#[rstest]
fn epic_window_is_absent_without_scheduled_children() {
    let no_children: [&Schedule; 0] = [];
    assert_eq!(EpicWindow::aggregate(no_children), None);
}

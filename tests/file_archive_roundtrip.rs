//! Round-trip and failure-path tests for the line-oriented file archive.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use eyre::Result;
use std::fs;
use taskboard::tracker::adapters::file::FileArchive;
use taskboard::tracker::domain::{EpicDraft, Schedule, Status, SubtaskDraft, TaskDraft};
use taskboard::tracker::ports::{Archive, ArchiveError};
use taskboard::tracker::services::TaskStore;
use tempfile::TempDir;

const FILE_NAME: &str = "taskboard.csv";
const HEADER: &str = "id,type,name,status,description,epic,startTime,duration,endTime";

fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 10, 23, 18, 0, 0)
        .single()
        .expect("valid timestamp")
}

fn window(offset_minutes: i64, length_minutes: i64) -> Result<Schedule> {
    Ok(Schedule::new(
        base() + TimeDelta::minutes(offset_minutes),
        TimeDelta::minutes(length_minutes),
    )?)
}

fn populated_store() -> Result<TaskStore> {
    let mut store = TaskStore::new();
    store.create_task(TaskDraft {
        name: "Wash floor".to_owned(),
        description: "Weekly chore".to_owned(),
        status: Some(Status::InProgress),
        schedule: Some(window(0, 10)?),
    })?;
    let epic = store.create_epic(EpicDraft {
        name: "Move house".to_owned(),
        description: String::new(),
    });
    store.create_subtask(SubtaskDraft {
        epic_id: epic.id(),
        name: "Pack books".to_owned(),
        description: String::new(),
        status: Some(Status::Done),
        schedule: Some(window(30, 60)?),
    })?;
    store.create_subtask(SubtaskDraft {
        epic_id: epic.id(),
        name: "Hire van".to_owned(),
        description: "Friday at the latest".to_owned(),
        status: None,
        schedule: None,
    })?;
    Ok(store)
}

#[test]
fn save_then_load_round_trips_every_collection() -> Result<()> {
    let dir = TempDir::new()?;
    let archive = FileArchive::open(dir.path(), FILE_NAME)?;
    let original = populated_store()?;

    archive.save(&original.snapshot())?;
    let restored = TaskStore::from_snapshot(archive.load()?)?;

    assert_eq!(restored.all_tasks(), original.all_tasks());
    assert_eq!(restored.all_epics(), original.all_epics());
    assert_eq!(restored.all_subtasks(), original.all_subtasks());

    let original_order: Vec<u32> = original
        .prioritized()
        .iter()
        .map(|item| item.id().value())
        .collect();
    let restored_order: Vec<u32> = restored
        .prioritized()
        .iter()
        .map(|item| item.id().value())
        .collect();
    assert_eq!(restored_order, original_order);
    Ok(())
}

#[test]
fn saved_file_carries_a_header_and_one_record_per_entity() -> Result<()> {
    let dir = TempDir::new()?;
    let archive = FileArchive::open(dir.path(), FILE_NAME)?;
    archive.save(&populated_store()?.snapshot())?;

    let contents = fs::read_to_string(dir.path().join(FILE_NAME))?;
    let lines: Vec<&str> = contents.lines().collect();

    assert_eq!(lines.first().copied(), Some(HEADER));
    assert_eq!(lines.len(), 5);
    assert!(lines.iter().any(|line| line.starts_with("1,TASK,")));
    assert!(lines.iter().any(|line| line.starts_with("2,EPIC,")));
    assert!(lines.iter().any(|line| line.starts_with("3,SUBTASK,")));
    // The unscheduled subtask keeps its time columns empty.
    assert!(
        lines
            .iter()
            .any(|line| line.starts_with("4,SUBTASK,") && line.ends_with(",,,"))
    );
    Ok(())
}

#[test]
fn loading_a_missing_file_reports_io_failure() -> Result<()> {
    let dir = TempDir::new()?;
    let archive = FileArchive::open(dir.path(), FILE_NAME)?;

    assert!(!archive.exists());
    assert!(matches!(archive.load(), Err(ArchiveError::Io(_))));
    Ok(())
}

#[test]
fn loading_a_header_only_file_yields_an_empty_snapshot() -> Result<()> {
    let dir = TempDir::new()?;
    fs::write(dir.path().join(FILE_NAME), format!("{HEADER}\n"))?;

    let snapshot = FileArchive::open(dir.path(), FILE_NAME)?.load()?;
    assert!(snapshot.tasks.is_empty());
    assert!(snapshot.epics.is_empty());
    assert!(snapshot.subtasks.is_empty());
    Ok(())
}

#[test]
fn malformed_records_are_rejected_with_the_offending_line() -> Result<()> {
    let dir = TempDir::new()?;
    fs::write(
        dir.path().join(FILE_NAME),
        format!("{HEADER}\n1,GADGET,x,NEW,,,,,\n"),
    )?;

    let result = FileArchive::open(dir.path(), FILE_NAME)?.load();
    let Err(ArchiveError::Malformed { line, .. }) = result else {
        panic!("expected a malformed-record error");
    };
    assert!(line.starts_with("1,GADGET"));
    Ok(())
}

#[test]
fn subtask_record_without_an_epic_id_is_malformed() -> Result<()> {
    let dir = TempDir::new()?;
    fs::write(
        dir.path().join(FILE_NAME),
        format!("{HEADER}\n3,SUBTASK,x,NEW,,,,,\n"),
    )?;

    assert!(matches!(
        FileArchive::open(dir.path(), FILE_NAME)?.load(),
        Err(ArchiveError::Malformed { .. })
    ));
    Ok(())
}

#[test]
fn field_values_that_break_the_line_format_are_refused() -> Result<()> {
    let dir = TempDir::new()?;
    let archive = FileArchive::open(dir.path(), FILE_NAME)?;
    let mut store = TaskStore::new();
    store.create_task(TaskDraft {
        name: "comma, separated".to_owned(),
        description: String::new(),
        status: None,
        schedule: None,
    })?;

    let result = archive.save(&store.snapshot());
    assert!(matches!(result, Err(ArchiveError::UnwritableField(_))));
    Ok(())
}

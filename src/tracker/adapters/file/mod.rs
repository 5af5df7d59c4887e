//! Line-oriented file archive for task store snapshots.
//!
//! The format is one header line followed by one record line per entity
//! (tasks, then epics, then subtasks, each group in id order), fields
//! comma-separated:
//!
//! ```text
//! id,type,name,status,description,epic,startTime,duration,endTime
//! 1,TASK,Wash floor,NEW,Weekly chore,,2024-10-23T18:00:00Z,10,2024-10-23T18:10:00Z
//! 2,EPIC,Move house,IN_PROGRESS,,,,,
//! 3,SUBTASK,Pack books,DONE,,2,2024-10-24T09:00:00Z,30,2024-10-24T09:30:00Z
//! ```
//!
//! Start and end instants are RFC 3339 UTC; durations are whole minutes
//! (the granularity of every wire surface). The `epic` column is filled
//! only on subtask records, and the three time columns are empty on
//! unscheduled items. Epic records carry their derived window for
//! inspectability, but loading discards it; derived state is recomputed
//! when the snapshot is restored into a store.

use crate::tracker::domain::{
    Epic, ItemId, ItemKind, Schedule, Status, Subtask, Task,
};
use crate::tracker::ports::{Archive, ArchiveError, ArchiveResult, StoreSnapshot};
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use chrono::{DateTime, SecondsFormat, TimeDelta, Utc};
use std::io::Write;
use std::path::Path;

const HEADER: &str = "id,type,name,status,description,epic,startTime,duration,endTime";

/// Snapshot archive backed by one file under a directory handle.
///
/// The directory is opened with ambient authority once at construction;
/// all subsequent reads and writes go through the capability handle.
#[derive(Debug)]
pub struct FileArchive {
    dir: Dir,
    file_name: String,
}

impl FileArchive {
    /// Opens an archive over `dir`/`file_name`.
    ///
    /// The directory must exist; the snapshot file need not.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::Io`] when the directory cannot be opened.
    pub fn open(dir: impl AsRef<Path>, file_name: impl Into<String>) -> ArchiveResult<Self> {
        let dir = Dir::open_ambient_dir(dir, ambient_authority())?;
        Ok(Self {
            dir,
            file_name: file_name.into(),
        })
    }

    /// Reports whether the snapshot file exists.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.dir.exists(&self.file_name)
    }
}

impl Archive for FileArchive {
    fn save(&self, snapshot: &StoreSnapshot) -> ArchiveResult<()> {
        let mut contents = String::from(HEADER);
        contents.push('\n');
        for task in &snapshot.tasks {
            contents.push_str(&encode_task(task)?);
            contents.push('\n');
        }
        for epic in &snapshot.epics {
            contents.push_str(&encode_epic(epic)?);
            contents.push('\n');
        }
        for subtask in &snapshot.subtasks {
            contents.push_str(&encode_subtask(subtask)?);
            contents.push('\n');
        }

        let mut file = self.dir.create(&self.file_name)?;
        file.write_all(contents.as_bytes())?;
        file.flush()?;
        Ok(())
    }

    fn load(&self) -> ArchiveResult<StoreSnapshot> {
        let contents = self.dir.read_to_string(&self.file_name)?;
        let mut snapshot = StoreSnapshot::default();
        for line in contents.lines() {
            let record = line.trim();
            if record.is_empty() || record == HEADER {
                continue;
            }
            decode_record(record, &mut snapshot)?;
        }
        Ok(snapshot)
    }
}

/// Validates that a free-text field survives the line format.
fn field(value: &str) -> ArchiveResult<&str> {
    if value.contains(',') || value.contains('\n') || value.contains('\r') {
        return Err(ArchiveError::UnwritableField(value.to_owned()));
    }
    Ok(value)
}

fn format_instant(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Renders the shared record shape; `times` is `(start, duration, end)`.
fn encode_record(
    id: ItemId,
    kind: ItemKind,
    name: &str,
    status: Status,
    description: &str,
    epic: Option<ItemId>,
    times: Option<(DateTime<Utc>, TimeDelta, DateTime<Utc>)>,
) -> ArchiveResult<String> {
    let name = field(name)?;
    let description = field(description)?;
    let epic = epic.map(|parent| parent.to_string()).unwrap_or_default();
    let (start, duration, end) = match times {
        Some((start, duration, end)) => (
            format_instant(start),
            duration.num_minutes().to_string(),
            format_instant(end),
        ),
        None => (String::new(), String::new(), String::new()),
    };
    Ok(format!(
        "{id},{kind},{name},{status},{description},{epic},{start},{duration},{end}",
        kind = kind.as_str(),
        status = status.as_str(),
    ))
}

fn encode_task(task: &Task) -> ArchiveResult<String> {
    encode_record(
        task.id(),
        ItemKind::Task,
        task.name(),
        task.status(),
        task.description(),
        None,
        task.schedule()
            .map(|window| (window.start(), window.duration(), window.end())),
    )
}

fn encode_epic(epic: &Epic) -> ArchiveResult<String> {
    encode_record(
        epic.id(),
        ItemKind::Epic,
        epic.name(),
        epic.status(),
        epic.description(),
        None,
        epic.window()
            .map(|window| (window.start(), window.duration(), window.end())),
    )
}

fn encode_subtask(subtask: &Subtask) -> ArchiveResult<String> {
    encode_record(
        subtask.id(),
        ItemKind::Subtask,
        subtask.name(),
        subtask.status(),
        subtask.description(),
        Some(subtask.epic_id()),
        subtask
            .schedule()
            .map(|window| (window.start(), window.duration(), window.end())),
    )
}

fn malformed(line: &str, reason: impl Into<String>) -> ArchiveError {
    ArchiveError::Malformed {
        line: line.to_owned(),
        reason: reason.into(),
    }
}

/// Decodes one record line into the snapshot under construction.
fn decode_record(line: &str, snapshot: &mut StoreSnapshot) -> ArchiveResult<()> {
    let mut parts = line.split(',');

    let id: ItemId = parts
        .next()
        .ok_or_else(|| malformed(line, "missing id"))?
        .parse()
        .map_err(|_| malformed(line, "invalid id"))?;
    let kind = ItemKind::try_from(parts.next().ok_or_else(|| malformed(line, "missing type"))?)
        .map_err(|err| malformed(line, err.to_string()))?;
    let name = parts
        .next()
        .ok_or_else(|| malformed(line, "missing name"))?
        .to_owned();
    let status = Status::try_from(parts.next().ok_or_else(|| malformed(line, "missing status"))?)
        .map_err(|err| malformed(line, err.to_string()))?;
    let description = parts.next().unwrap_or_default().to_owned();
    let epic_field = parts.next().unwrap_or_default();
    let start_field = parts.next().unwrap_or_default();
    let duration_field = parts.next().unwrap_or_default();
    // The trailing end column is derived and ignored on load.

    let schedule = decode_schedule(line, start_field, duration_field)?;

    match kind {
        ItemKind::Task => snapshot
            .tasks
            .push(Task::new(id, name, description, status, schedule)),
        ItemKind::Epic => snapshot.epics.push(Epic::new(id, name, description)),
        ItemKind::Subtask => {
            let epic_id: ItemId = epic_field
                .parse()
                .map_err(|_| malformed(line, "subtask record has no epic id"))?;
            snapshot.subtasks.push(Subtask::new(
                id,
                epic_id,
                name,
                description,
                status,
                schedule,
            ));
        }
    }
    Ok(())
}

fn decode_schedule(
    line: &str,
    start_field: &str,
    duration_field: &str,
) -> ArchiveResult<Option<Schedule>> {
    if start_field.is_empty() {
        return Ok(None);
    }
    let start = DateTime::parse_from_rfc3339(start_field)
        .map_err(|err| malformed(line, format!("invalid start time: {err}")))?
        .with_timezone(&Utc);
    let minutes: i64 = duration_field
        .parse()
        .map_err(|_| malformed(line, "invalid duration"))?;
    let schedule = Schedule::new(start, TimeDelta::minutes(minutes))
        .map_err(|err| malformed(line, err.to_string()))?;
    Ok(Some(schedule))
}

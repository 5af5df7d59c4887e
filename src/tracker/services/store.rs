//! The task store: entity tables, id assignment, and orchestration of the
//! view history, the priority index, and epic aggregate recomputation.

use crate::tracker::domain::{
    Epic, EpicDraft, EpicUpdate, EpicWindow, ItemId, ItemKind, PriorityIndex, Status, Subtask,
    SubtaskDraft, SubtaskUpdate, Task, TaskDraft, TaskUpdate, TrackerError, TrackerResult,
    ViewHistory, WorkItem,
};
use crate::tracker::ports::StoreSnapshot;
use std::collections::BTreeMap;
use tracing::debug;

/// The task-tracking engine.
///
/// Owns the three entity tables, the global id counter, the view history,
/// and the priority index, and is the only component with mutation
/// authority over any of them. The store is synchronous and single-writer;
/// concurrent hosts must serialize access externally (the HTTP façade
/// holds it behind one mutex).
///
/// Tables are keyed maps ordered by id, so collection reads come back in
/// creation order.
#[derive(Debug, Clone)]
pub struct TaskStore {
    tasks: BTreeMap<ItemId, Task>,
    epics: BTreeMap<ItemId, Epic>,
    subtasks: BTreeMap<ItemId, Subtask>,
    history: ViewHistory,
    priority: PriorityIndex,
    next_id: u32,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskStore {
    /// Creates an empty store. The first assigned id is 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tasks: BTreeMap::new(),
            epics: BTreeMap::new(),
            subtasks: BTreeMap::new(),
            history: ViewHistory::new(),
            priority: PriorityIndex::new(),
            next_id: 1,
        }
    }

    fn allocate_id(&mut self) -> ItemId {
        let id = ItemId::new(self.next_id);
        self.next_id += 1;
        id
    }

    // --- creation ---

    /// Stores a new standalone task and returns it with its assigned id.
    ///
    /// A scheduled draft is checked against the priority index and indexed
    /// on success.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::SchedulingConflict`] when the draft's window
    /// overlaps an existing prioritized entry; the store is unchanged.
    pub fn create_task(&mut self, draft: TaskDraft) -> TrackerResult<Task> {
        if let Some(window) = &draft.schedule {
            if self.priority.conflicts_with(window, None) {
                return Err(TrackerError::SchedulingConflict);
            }
        }
        let id = self.allocate_id();
        let task = Task::new(
            id,
            draft.name,
            draft.description,
            draft.status.unwrap_or(Status::New),
            draft.schedule,
        );
        if let Some(window) = task.schedule() {
            self.priority.insert(id, window);
        }
        self.tasks.insert(id, task.clone());
        Ok(task)
    }

    /// Stores a new epic and returns it with its assigned id.
    ///
    /// Fresh epics have an empty subtask list, status `NEW`, and no time
    /// window; epics never enter the priority index.
    pub fn create_epic(&mut self, draft: EpicDraft) -> Epic {
        let id = self.allocate_id();
        let epic = Epic::new(id, draft.name, draft.description);
        self.epics.insert(id, epic.clone());
        epic
    }

    /// Stores a new subtask under its epic and returns it with its
    /// assigned id.
    ///
    /// On success the subtask id is appended to the parent's list, the
    /// parent's status and window are recomputed, and a scheduled subtask
    /// is indexed.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::NotFound`] when the named epic does not
    /// exist, or [`TrackerError::SchedulingConflict`] when the draft's
    /// window overlaps an existing prioritized entry. Either way the store
    /// is unchanged.
    pub fn create_subtask(&mut self, draft: SubtaskDraft) -> TrackerResult<Subtask> {
        if !self.epics.contains_key(&draft.epic_id) {
            return Err(TrackerError::NotFound {
                kind: ItemKind::Epic,
                id: draft.epic_id,
            });
        }
        if let Some(window) = &draft.schedule {
            if self.priority.conflicts_with(window, None) {
                return Err(TrackerError::SchedulingConflict);
            }
        }
        let id = self.allocate_id();
        let subtask = Subtask::new(
            id,
            draft.epic_id,
            draft.name,
            draft.description,
            draft.status.unwrap_or(Status::New),
            draft.schedule,
        );
        if let Some(window) = subtask.schedule() {
            self.priority.insert(id, window);
        }
        let epic_id = subtask.epic_id();
        self.subtasks.insert(id, subtask.clone());
        if let Some(epic) = self.epics.get_mut(&epic_id) {
            epic.attach_subtask(id);
        }
        self.refresh_epic(epic_id);
        Ok(subtask)
    }

    // --- updates ---

    /// Replaces a stored task's mutable fields and repositions it in the
    /// priority index.
    ///
    /// An absent status on the update preserves the stored status rather
    /// than inventing a default.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::NotFound`] when the id is unknown, or
    /// [`TrackerError::SchedulingConflict`] when the new window overlaps
    /// another tracked entry. A rejected update is fully reversed: the
    /// stale index entry is restored and the stored task is untouched.
    pub fn update_task(&mut self, update: TaskUpdate) -> TrackerResult<Task> {
        let stored_status = match self.tasks.get(&update.id) {
            Some(task) => task.status(),
            None => {
                return Err(TrackerError::NotFound {
                    kind: ItemKind::Task,
                    id: update.id,
                });
            }
        };

        self.priority.remove(update.id);
        if let Some(window) = &update.schedule {
            if self.priority.conflicts_with(window, None) {
                self.restore_index_entry(update.id, ItemKind::Task);
                return Err(TrackerError::SchedulingConflict);
            }
        }

        let task = Task::new(
            update.id,
            update.name,
            update.description,
            update.status.unwrap_or(stored_status),
            update.schedule,
        );
        if let Some(window) = task.schedule() {
            self.priority.insert(update.id, window);
        }
        self.tasks.insert(update.id, task.clone());
        Ok(task)
    }

    /// Replaces an epic's name and description.
    ///
    /// Status and time fields are always store-derived; anything a caller
    /// supplies for them is ignored by construction, since the update
    /// payload does not carry them.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::NotFound`] when the id is unknown.
    pub fn update_epic(&mut self, update: EpicUpdate) -> TrackerResult<Epic> {
        let Some(epic) = self.epics.get_mut(&update.id) else {
            return Err(TrackerError::NotFound {
                kind: ItemKind::Epic,
                id: update.id,
            });
        };
        epic.set_details(update.name, update.description);
        Ok(epic.clone())
    }

    /// Replaces a stored subtask's mutable fields, repositions it in the
    /// priority index, and recomputes the owning epic's aggregates.
    ///
    /// An absent status on the update preserves the stored status.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::NotFound`] when the subtask id or the named
    /// epic is unknown, [`TrackerError::EpicMismatch`] when the named
    /// epic's subtask list does not contain this subtask (re-parenting is
    /// not supported), or [`TrackerError::SchedulingConflict`] when the
    /// new window overlaps another tracked entry. A rejected update is
    /// fully reversed.
    pub fn update_subtask(&mut self, update: SubtaskUpdate) -> TrackerResult<Subtask> {
        let stored_status = match self.subtasks.get(&update.id) {
            Some(subtask) => subtask.status(),
            None => {
                return Err(TrackerError::NotFound {
                    kind: ItemKind::Subtask,
                    id: update.id,
                });
            }
        };
        let Some(epic) = self.epics.get(&update.epic_id) else {
            return Err(TrackerError::NotFound {
                kind: ItemKind::Epic,
                id: update.epic_id,
            });
        };
        if !epic.subtask_ids().contains(&update.id) {
            return Err(TrackerError::EpicMismatch {
                subtask: update.id,
                epic: update.epic_id,
            });
        }

        self.priority.remove(update.id);
        if let Some(window) = &update.schedule {
            if self.priority.conflicts_with(window, None) {
                self.restore_index_entry(update.id, ItemKind::Subtask);
                return Err(TrackerError::SchedulingConflict);
            }
        }

        let subtask = Subtask::new(
            update.id,
            update.epic_id,
            update.name,
            update.description,
            update.status.unwrap_or(stored_status),
            update.schedule,
        );
        if let Some(window) = subtask.schedule() {
            self.priority.insert(update.id, window);
        }
        self.subtasks.insert(update.id, subtask.clone());
        self.refresh_epic(update.epic_id);
        Ok(subtask)
    }

    /// Re-inserts the stored window for an item whose provisional index
    /// removal must be undone after a rejected update.
    fn restore_index_entry(&mut self, id: ItemId, kind: ItemKind) {
        let stored = match kind {
            ItemKind::Task => self.tasks.get(&id).and_then(Task::schedule),
            ItemKind::Subtask => self.subtasks.get(&id).and_then(Subtask::schedule),
            ItemKind::Epic => None,
        };
        if let Some(window) = stored {
            self.priority.insert(id, window);
        }
    }

    // --- deletion ---

    /// Removes a standalone task and its history and index entries.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::NotFound`] when the id is unknown.
    pub fn delete_task(&mut self, id: ItemId) -> TrackerResult<()> {
        if self.tasks.remove(&id).is_none() {
            debug!(%id, "delete requested for unknown task");
            return Err(TrackerError::NotFound {
                kind: ItemKind::Task,
                id,
            });
        }
        self.priority.remove(id);
        self.history.remove(id);
        Ok(())
    }

    /// Removes an epic and cascades over its subtasks.
    ///
    /// Every child leaves the subtask table, the priority index, and the
    /// view history before the epic itself is removed, so no orphaned
    /// subtask ever survives its parent.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::NotFound`] when the id is unknown.
    pub fn delete_epic(&mut self, id: ItemId) -> TrackerResult<()> {
        let Some(epic) = self.epics.remove(&id) else {
            debug!(%id, "delete requested for unknown epic");
            return Err(TrackerError::NotFound {
                kind: ItemKind::Epic,
                id,
            });
        };
        for child in epic.subtask_ids() {
            self.subtasks.remove(child);
            self.priority.remove(*child);
            self.history.remove(*child);
        }
        self.history.remove(id);
        Ok(())
    }

    /// Removes a subtask, detaches it from its parent epic, and recomputes
    /// the parent's aggregates.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::NotFound`] when the id is unknown.
    pub fn delete_subtask(&mut self, id: ItemId) -> TrackerResult<()> {
        let Some(subtask) = self.subtasks.remove(&id) else {
            debug!(%id, "delete requested for unknown subtask");
            return Err(TrackerError::NotFound {
                kind: ItemKind::Subtask,
                id,
            });
        };
        self.priority.remove(id);
        self.history.remove(id);
        let epic_id = subtask.epic_id();
        if let Some(epic) = self.epics.get_mut(&epic_id) {
            epic.detach_subtask(id);
        }
        self.refresh_epic(epic_id);
        Ok(())
    }

    /// Clears the task table along with the affected history and index
    /// entries.
    pub fn delete_all_tasks(&mut self) {
        for (id, _) in std::mem::take(&mut self.tasks) {
            self.priority.remove(id);
            self.history.remove(id);
        }
    }

    /// Clears the epic table and, by cascade, the whole subtask table.
    pub fn delete_all_epics(&mut self) {
        for (id, _) in std::mem::take(&mut self.epics) {
            self.history.remove(id);
        }
        for (id, _) in std::mem::take(&mut self.subtasks) {
            self.priority.remove(id);
            self.history.remove(id);
        }
    }

    /// Clears the subtask table and resets every epic to an empty list,
    /// status `NEW`, and no window.
    pub fn delete_all_subtasks(&mut self) {
        for (id, _) in std::mem::take(&mut self.subtasks) {
            self.priority.remove(id);
            self.history.remove(id);
        }
        for epic in self.epics.values_mut() {
            epic.clear_subtasks();
            epic.set_derived(Status::New, None);
        }
    }

    // --- reads ---

    /// Returns a copy of the task with `id`, recording the view, or `None`
    /// when absent.
    pub fn get_task(&mut self, id: ItemId) -> Option<Task> {
        let task = self.tasks.get(&id)?.clone();
        self.history.record(WorkItem::Task(task.clone()));
        Some(task)
    }

    /// Returns a copy of the epic with `id`, recording the view, or `None`
    /// when absent.
    pub fn get_epic(&mut self, id: ItemId) -> Option<Epic> {
        let epic = self.epics.get(&id)?.clone();
        self.history.record(WorkItem::Epic(epic.clone()));
        Some(epic)
    }

    /// Returns a copy of the subtask with `id`, recording the view, or
    /// `None` when absent.
    pub fn get_subtask(&mut self, id: ItemId) -> Option<Subtask> {
        let subtask = self.subtasks.get(&id)?.clone();
        self.history.record(WorkItem::Subtask(subtask.clone()));
        Some(subtask)
    }

    /// Returns all standalone tasks in creation order.
    #[must_use]
    pub fn all_tasks(&self) -> Vec<Task> {
        self.tasks.values().cloned().collect()
    }

    /// Returns all epics in creation order.
    #[must_use]
    pub fn all_epics(&self) -> Vec<Epic> {
        self.epics.values().cloned().collect()
    }

    /// Returns all subtasks in creation order.
    #[must_use]
    pub fn all_subtasks(&self) -> Vec<Subtask> {
        self.subtasks.values().cloned().collect()
    }

    /// Returns the subtasks owned by `epic_id` in list order, or an empty
    /// sequence when the epic is unknown.
    #[must_use]
    pub fn epic_subtasks(&self, epic_id: ItemId) -> Vec<Subtask> {
        self.epics
            .get(&epic_id)
            .map(|epic| {
                epic.subtask_ids()
                    .iter()
                    .filter_map(|id| self.subtasks.get(id))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Returns the view history, oldest first.
    #[must_use]
    pub fn history(&self) -> Vec<WorkItem> {
        self.history.snapshot()
    }

    /// Returns every scheduled task and subtask in ascending
    /// `(start, id)` order.
    #[must_use]
    pub fn prioritized(&self) -> Vec<WorkItem> {
        self.priority
            .ids()
            .iter()
            .filter_map(|id| {
                self.tasks
                    .get(id)
                    .cloned()
                    .map(WorkItem::Task)
                    .or_else(|| self.subtasks.get(id).cloned().map(WorkItem::Subtask))
            })
            .collect()
    }

    // --- persistence boundary ---

    /// Captures the full entity state for the persistence codec.
    #[must_use]
    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            tasks: self.all_tasks(),
            epics: self.all_epics(),
            subtasks: self.all_subtasks(),
        }
    }

    /// Rebuilds a store from a loaded snapshot.
    ///
    /// Subtasks are re-linked into their parents' id lists in id order,
    /// every epic's status and window are recomputed from its children,
    /// the priority index is rebuilt from scheduled items, and the id
    /// counter resumes above the largest loaded id. View history is not
    /// persisted and starts empty.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::NotFound`] when a subtask references an
    /// epic absent from the snapshot.
    pub fn from_snapshot(snapshot: StoreSnapshot) -> TrackerResult<Self> {
        let mut store = Self::new();
        let mut max_id = 0u32;

        for task in snapshot.tasks {
            max_id = max_id.max(task.id().value());
            if let Some(window) = task.schedule() {
                store.priority.insert(task.id(), window);
            }
            store.tasks.insert(task.id(), task);
        }

        for epic in snapshot.epics {
            max_id = max_id.max(epic.id().value());
            // Stored derived state and linkage are discarded; both are
            // recomputed from the subtask records below.
            let fresh = Epic::new(
                epic.id(),
                epic.name().to_owned(),
                epic.description().to_owned(),
            );
            store.epics.insert(epic.id(), fresh);
        }

        let mut subtasks = snapshot.subtasks;
        subtasks.sort_by_key(Subtask::id);
        for subtask in subtasks {
            max_id = max_id.max(subtask.id().value());
            let epic_id = subtask.epic_id();
            let Some(epic) = store.epics.get_mut(&epic_id) else {
                return Err(TrackerError::NotFound {
                    kind: ItemKind::Epic,
                    id: epic_id,
                });
            };
            epic.attach_subtask(subtask.id());
            if let Some(window) = subtask.schedule() {
                store.priority.insert(subtask.id(), window);
            }
            store.subtasks.insert(subtask.id(), subtask);
        }

        let epic_ids: Vec<ItemId> = store.epics.keys().copied().collect();
        for id in epic_ids {
            store.refresh_epic(id);
        }
        store.next_id = max_id + 1;
        Ok(store)
    }

    // --- aggregation ---

    /// Recomputes an epic's derived status and window from its children.
    fn refresh_epic(&mut self, epic_id: ItemId) {
        let Some(epic) = self.epics.get(&epic_id) else {
            return;
        };
        let mut statuses = Vec::with_capacity(epic.subtask_ids().len());
        let mut windows = Vec::new();
        for child_id in epic.subtask_ids() {
            if let Some(subtask) = self.subtasks.get(child_id) {
                statuses.push(subtask.status());
                if let Some(window) = subtask.schedule() {
                    windows.push(window);
                }
            }
        }
        let status = Status::aggregate(statuses);
        let window = EpicWindow::aggregate(windows.iter());
        if let Some(stored) = self.epics.get_mut(&epic_id) {
            stored.set_derived(status, window);
        }
        debug!(epic = %epic_id, status = status.as_str(), "recomputed epic aggregates");
    }
}

//! # Undo/Redo History
//!
//! Snapshot-based history of the project.
//!
//! ## Design
//!
//! - Each committed transaction that changes the project records the
//!   previous project
//! - Undo swaps the current project with the most recent entry and moves the
//!   current one to the redo stack
//! - New edits clear the redo stack
//! - Batches group several transactions into one undo step. Batches nest;
//!   only the outermost `end_batch` records an entry.
//! - UI-only transactions are never recorded

use atelier_model::Project;

/// One undo (or redo) step
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    /// Project as it was before the step
    pub project: Project,

    pub description: Option<String>,
}

#[derive(Debug)]
struct PendingBatch {
    depth: usize,
    before: Project,
    description: Option<String>,
}

#[derive(Debug)]
pub struct History {
    /// Most recent last
    undo_stack: Vec<HistoryEntry>,

    /// Most recent last
    redo_stack: Vec<HistoryEntry>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,

    batch: Option<PendingBatch>,
}

impl History {
    /// History with the default 100 undo levels
    pub fn new() -> Self {
        Self::with_max_levels(100)
    }

    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_levels,
            batch: None,
        }
    }

    /// Record `before` as the state to return to. Inside a batch this is a
    /// no-op: the batch remembers the project as it was when it began.
    pub fn record(&mut self, before: &Project, description: Option<&str>) {
        if let Some(batch) = &mut self.batch {
            if batch.description.is_none() {
                batch.description = description.map(str::to_string);
            }
            return;
        }

        self.push_entry(HistoryEntry {
            project: before.clone(),
            description: description.map(str::to_string),
        });
    }

    pub fn begin_batch(&mut self, current: &Project) {
        match &mut self.batch {
            Some(batch) => batch.depth += 1,
            None => {
                self.batch = Some(PendingBatch {
                    depth: 1,
                    before: current.clone(),
                    description: None,
                })
            }
        }
    }

    pub fn set_batch_description(&mut self, description: impl Into<String>) {
        if let Some(batch) = &mut self.batch {
            batch.description = Some(description.into());
        }
    }

    /// Close one batch level. Returns true if the outermost batch closed
    /// and recorded an entry.
    pub fn end_batch(&mut self, current: &Project) -> bool {
        let Some(batch) = &mut self.batch else {
            return false;
        };

        batch.depth -= 1;
        if batch.depth > 0 {
            return false;
        }

        match self.batch.take() {
            Some(batch) if batch.before != *current => {
                self.push_entry(HistoryEntry {
                    project: batch.before,
                    description: batch.description,
                });
                true
            }
            _ => false,
        }
    }

    pub fn is_batching(&self) -> bool {
        self.batch.is_some()
    }

    fn push_entry(&mut self, entry: HistoryEntry) {
        self.undo_stack.push(entry);

        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.remove(0);
        }

        // New action invalidates the redo future
        self.redo_stack.clear();
    }

    /// Pop the most recent undo entry, parking `current` on the redo stack.
    /// Returns the project to restore.
    pub fn take_undo(&mut self, current: &Project) -> Option<Project> {
        let entry = self.undo_stack.pop()?;
        self.redo_stack.push(HistoryEntry {
            project: current.clone(),
            description: entry.description.clone(),
        });
        Some(entry.project)
    }

    /// Pop the most recent redo entry, parking `current` on the undo stack.
    pub fn take_redo(&mut self, current: &Project) -> Option<Project> {
        let entry = self.redo_stack.pop()?;
        self.undo_stack.push(HistoryEntry {
            project: current.clone(),
            description: entry.description.clone(),
        });
        Some(entry.project)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.batch = None;
    }

    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack
            .last()
            .and_then(|entry| entry.description.as_deref())
    }

    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack
            .last()
            .and_then(|entry| entry.description.as_deref())
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

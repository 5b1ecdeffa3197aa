use std::collections::BTreeSet;

use anyhow::Context;
use tracing::{debug, info, warn};

use crate::stage::Stage;
use crate::storage::{KeyValueStore, TASKS_KEY};
use crate::task::{Task, TaskFields, TaskId};

/// The task collection plus its write-through persistence.
///
/// Every mutation that changes the collection serializes the whole of it
/// back to storage before returning. Unknown ids are ignored.
#[derive(Debug, Clone)]
pub struct TaskStore<S> {
    storage: S,
    tasks: Vec<Task>,
}

impl<S: KeyValueStore> TaskStore<S> {
    /// Reads the persisted collection. Missing, unreadable or malformed
    /// state yields an empty board rather than an error.
    #[tracing::instrument(skip(storage))]
    pub fn load(storage: S) -> Self {
        let tasks = match storage.get(TASKS_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Task>>(&raw) {
                Ok(tasks) => tasks,
                Err(error) => {
                    warn!(%error, "persisted tasks are malformed; starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(error) => {
                warn!(error = %format!("{error:#}"), "failed reading persisted tasks; starting empty");
                Vec::new()
            }
        };

        info!(count = tasks.len(), "loaded tasks");
        Self { storage, tasks }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn all(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| &task.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Appends a task in the first stage. Returns `None` without touching
    /// storage when the title is blank.
    #[tracing::instrument(skip(self, fields))]
    pub fn create(&mut self, fields: TaskFields) -> anyhow::Result<Option<TaskId>> {
        let Some(fields) = normalize(fields) else {
            warn!("refusing to create task with blank title");
            return Ok(None);
        };

        let taken: BTreeSet<&str> = self.tasks.iter().map(|task| task.id.as_str()).collect();
        let id = TaskId::generate(&taken);
        let task = Task::new(id.clone(), fields);
        debug!(id = %task.id, title = %task.title, "creating task");

        self.tasks.push(task);
        self.persist()?;
        Ok(Some(id))
    }

    #[tracing::instrument(skip(self, fields), fields(id = %id))]
    pub fn update(&mut self, id: &TaskId, fields: TaskFields) -> anyhow::Result<bool> {
        let Some(fields) = normalize(fields) else {
            warn!("refusing to blank out task title");
            return Ok(false);
        };
        let Some(task) = self.tasks.iter_mut().find(|task| &task.id == id) else {
            debug!("update for unknown task ignored");
            return Ok(false);
        };

        task.apply(fields);
        self.persist()?;
        Ok(true)
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    pub fn remove(&mut self, id: &TaskId) -> anyhow::Result<bool> {
        let before = self.tasks.len();
        self.tasks.retain(|task| &task.id != id);
        if self.tasks.len() == before {
            debug!("remove for unknown task ignored");
            return Ok(false);
        }

        self.persist()?;
        Ok(true)
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    pub fn set_status(&mut self, id: &TaskId, stage: Stage) -> anyhow::Result<bool> {
        let Some(task) = self.tasks.iter_mut().find(|task| &task.id == id) else {
            debug!("status change for unknown task ignored");
            return Ok(false);
        };

        debug!(from = %task.status, to = %stage, "changing stage");
        task.status = stage;
        self.persist()?;
        Ok(true)
    }

    pub fn move_next(&mut self, id: &TaskId) -> anyhow::Result<bool> {
        self.step(id, Stage::next)
    }

    pub fn move_previous(&mut self, id: &TaskId) -> anyhow::Result<bool> {
        self.step(id, Stage::previous)
    }

    fn step(&mut self, id: &TaskId, step: fn(Stage) -> Option<Stage>) -> anyhow::Result<bool> {
        let Some(target) = self.get(id).and_then(|task| step(task.status)) else {
            return Ok(false);
        };
        self.set_status(id, target)
    }

    #[tracing::instrument(skip(self))]
    fn persist(&self) -> anyhow::Result<()> {
        let json = serde_json::to_string(&self.tasks).context("failed to serialize tasks")?;
        self.storage
            .set(TASKS_KEY, &json)
            .context("failed to persist tasks")?;
        debug!(count = self.tasks.len(), "persisted tasks");
        Ok(())
    }
}

fn normalize(mut fields: TaskFields) -> Option<TaskFields> {
    let title = fields.title.trim();
    if title.is_empty() {
        return None;
    }
    fields.title = title.to_string();
    Some(fields)
}

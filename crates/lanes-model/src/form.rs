use chrono::NaiveDate;
use tracing::{debug, info};

use crate::storage::KeyValueStore;
use crate::store::TaskStore;
use crate::task::{Task, TaskFields, TaskId, due_date_serde};

/// Choices the form offers. Stored values are free-form; these only seed
/// dropdowns and defaults.
pub const CATEGORY_CHOICES: [&str; 4] = ["Work", "Personal", "Shopping", "Other"];
pub const PRIORITY_CHOICES: [&str; 3] = ["Low", "Medium", "High"];

const DEFAULT_PRIORITY: &str = "Medium";

/// Raw form inputs, exactly as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormDraft {
    pub title: String,
    pub description: String,
    pub category: String,
    pub priority: String,
    pub due_date: String,
    pub error: Option<String>,
}

impl Default for FormDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            category: CATEGORY_CHOICES[0].to_string(),
            priority: DEFAULT_PRIORITY.to_string(),
            due_date: String::new(),
            error: None,
        }
    }
}

impl FormDraft {
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
            category: task.category.clone(),
            priority: task.priority.clone(),
            due_date: task
                .due_date
                .map(|due| due.format(due_date_serde::FORMAT).to_string())
                .unwrap_or_default(),
            error: None,
        }
    }

    pub fn to_fields(&self) -> Result<TaskFields, String> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err("Title is required.".to_string());
        }

        let description = self.description.trim();
        let due = self.due_date.trim();
        let due_date = if due.is_empty() {
            None
        } else {
            Some(
                NaiveDate::parse_from_str(due, due_date_serde::FORMAT)
                    .map_err(|_| format!("Due date must be YYYY-MM-DD, got {due:?}."))?,
            )
        };

        Ok(TaskFields {
            title: title.to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
            category: self.category.trim().to_string(),
            priority: self.priority.trim().to_string(),
            due_date,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    Created(TaskId),
    Updated(TaskId),
    /// The task being edited disappeared before submit.
    Stale(TaskId),
    /// Validation failed; the form stays open with `draft().error` set.
    Rejected,
}

/// Create/edit modal state. An editing id selects edit mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormController {
    open: bool,
    editing: Option<TaskId>,
    draft: FormDraft,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn editing(&self) -> Option<&TaskId> {
        self.editing.as_ref()
    }

    pub fn heading(&self) -> &'static str {
        if self.editing.is_some() {
            "Edit Task"
        } else {
            "Add New Task"
        }
    }

    pub fn draft(&self) -> &FormDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut FormDraft {
        &mut self.draft
    }

    /// Fresh create mode; nothing from a previous edit survives.
    pub fn open_new(&mut self) {
        self.editing = None;
        self.draft = FormDraft::default();
        self.open = true;
    }

    pub fn open_edit(&mut self, task: &Task) {
        debug!(id = %task.id, "opening form in edit mode");
        self.editing = Some(task.id.clone());
        self.draft = FormDraft::from_task(task);
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.editing = None;
        self.draft = FormDraft::default();
    }

    #[tracing::instrument(skip(self, store), fields(editing = ?self.editing))]
    pub fn submit<S: KeyValueStore>(
        &mut self,
        store: &mut TaskStore<S>,
    ) -> anyhow::Result<FormOutcome> {
        let fields = match self.draft.to_fields() {
            Ok(fields) => fields,
            Err(message) => {
                debug!(%message, "form rejected");
                self.draft.error = Some(message);
                return Ok(FormOutcome::Rejected);
            }
        };

        let outcome = match self.editing.clone() {
            Some(id) => {
                if store.update(&id, fields)? {
                    FormOutcome::Updated(id)
                } else {
                    FormOutcome::Stale(id)
                }
            }
            None => match store.create(fields)? {
                Some(id) => FormOutcome::Created(id),
                None => {
                    self.draft.error = Some("Title is required.".to_string());
                    return Ok(FormOutcome::Rejected);
                }
            },
        };

        info!(?outcome, "form submitted");
        self.close();
        Ok(outcome)
    }
}

use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::stage::Stage;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Fresh v4 id that does not collide with any id in `taken`.
    pub fn generate(taken: &BTreeSet<&str>) -> Self {
        loop {
            let candidate = Uuid::new_v4().to_string();
            if !taken.contains(candidate.as_str()) {
                return Self(candidate);
            }
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TaskId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Everything about a task a user can type into the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFields {
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub priority: String,
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,

    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub priority: String,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "due_date_serde"
    )]
    pub due_date: Option<NaiveDate>,

    pub status: Stage,
}

impl Task {
    pub fn new(id: TaskId, fields: TaskFields) -> Self {
        let mut task = Self {
            id,
            title: String::new(),
            description: None,
            category: String::new(),
            priority: String::new(),
            due_date: None,
            status: Stage::first(),
        };
        task.apply(fields);
        task
    }

    /// Overwrites the editable fields; `id` and `status` are untouched.
    pub fn apply(&mut self, fields: TaskFields) {
        self.title = fields.title;
        self.description = fields.description;
        self.category = fields.category;
        self.priority = fields.priority;
        self.due_date = fields.due_date;
    }

    pub fn fields(&self) -> TaskFields {
        TaskFields {
            title: self.title.clone(),
            description: self.description.clone(),
            category: self.category.clone(),
            priority: self.priority.clone(),
            due_date: self.due_date,
        }
    }

    pub fn description_or_empty(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        if self.status.is_last() {
            return false;
        }
        self.due_date.map(|due| due < today).unwrap_or(false)
    }

    pub fn due_label(&self) -> String {
        match self.due_date {
            Some(due) => due.format("%b %-d, %Y").to_string(),
            None => "No due date".to_string(),
        }
    }

    /// CSS-style class derived from the free-form priority.
    pub fn priority_class(&self) -> String {
        self.priority.trim().to_lowercase()
    }
}

/// Due dates travel as `YYYY-MM-DD`; an empty string is what a blank date
/// input produces and reads as no date.
pub mod due_date_serde {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(value) => serializer.serialize_str(&value.format(FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => NaiveDate::parse_from_str(value, FORMAT)
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use chrono::NaiveDate;

    use super::{Task, TaskFields, TaskId};
    use crate::stage::Stage;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> Task {
        Task::new(
            TaskId::from("task-1"),
            TaskFields {
                title: "Ship release".to_string(),
                description: Some("cut the tag".to_string()),
                category: "Work".to_string(),
                priority: "High".to_string(),
                due_date: Some(date(2026, 3, 5)),
            },
        )
    }

    #[test]
    fn new_task_starts_in_first_stage() {
        assert_eq!(sample().status, Stage::first());
    }

    #[test]
    fn reads_legacy_board_records() {
        let raw = r#"[
            {"id":"task-1718000000000","title":"Water plants","description":"",
             "category":"Personal","priority":"Low","dueDate":"","status":"inprogress"}
        ]"#;
        let tasks: Vec<Task> = serde_json::from_str(raw).unwrap();
        assert_eq!(tasks[0].id.as_str(), "task-1718000000000");
        assert_eq!(tasks[0].due_date, None);
        assert_eq!(tasks[0].status, Stage::InProgress);
        assert_eq!(tasks[0].description_or_empty(), "");
    }

    #[test]
    fn writes_camel_case_keys_and_iso_dates() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["dueDate"], "2026-03-05");
        assert_eq!(json["status"], "todo");

        let mut bare = sample();
        bare.description = None;
        bare.due_date = None;
        let json = serde_json::to_value(bare).unwrap();
        assert!(json.get("dueDate").is_none());
        assert!(json.get("description").is_none());
    }

    #[test]
    fn rejects_garbage_due_date() {
        let raw = r#"{"id":"a","title":"x","dueDate":"soon","status":"todo"}"#;
        assert!(serde_json::from_str::<Task>(raw).is_err());
    }

    #[test]
    fn overdue_ignores_finished_tasks() {
        let mut task = sample();
        assert!(task.is_overdue(date(2026, 3, 6)));
        assert!(!task.is_overdue(date(2026, 3, 5)));
        task.status = Stage::Done;
        assert!(!task.is_overdue(date(2026, 3, 6)));
    }

    #[test]
    fn due_label_and_priority_class() {
        let mut task = sample();
        assert_eq!(task.due_label(), "Mar 5, 2026");
        assert_eq!(task.priority_class(), "high");
        task.due_date = None;
        assert_eq!(task.due_label(), "No due date");
    }

    #[test]
    fn apply_keeps_identity_and_stage() {
        let mut task = sample();
        task.status = Stage::Done;
        task.apply(TaskFields {
            title: "Renamed".to_string(),
            ..TaskFields::default()
        });
        assert_eq!(task.id.as_str(), "task-1");
        assert_eq!(task.status, Stage::Done);
        assert_eq!(task.title, "Renamed");
        assert_eq!(task.due_date, None);
    }

    #[test]
    fn generated_ids_avoid_taken_values() {
        let first = TaskId::generate(&BTreeSet::new());
        let taken: BTreeSet<&str> = [first.as_str()].into_iter().collect();
        let second = TaskId::generate(&taken);
        assert_ne!(first, second);
    }
}

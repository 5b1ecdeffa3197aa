use std::fmt;

use tracing::trace;

use crate::task::Task;

/// Dropdown value used as the
/// "match everything" choice.
pub const WILDCARD: &str = "all";

#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Default,
)]
pub enum Facet {
  #[default]
  Any,
  Exact(String)
}

impl Facet {
  pub fn parse(raw: &str) -> Self {
    if raw == WILDCARD {
      Self::Any
    } else {
      Self::Exact(raw.to_string())
    }
  }

  pub fn matches(
    &self,
    value: &str
  ) -> bool {
    match self {
      | Self::Any => true,
      | Self::Exact(expected) => {
        expected == value
      }
    }
  }

  /// Value to show in a dropdown.
  pub fn as_str(&self) -> &str {
    match self {
      | Self::Any => WILDCARD,
      | Self::Exact(value) => value
    }
  }
}

impl fmt::Display for Facet {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Default,
)]
pub struct FilterCriteria {
  search:       String,
  pub category: Facet,
  pub priority: Facet
}

impl FilterCriteria {
  pub fn new(
    search: &str,
    category: &str,
    priority: &str
  ) -> Self {
    let mut criteria = Self {
      search:   String::new(),
      category: Facet::parse(category),
      priority: Facet::parse(priority)
    };
    criteria.set_search(search);
    criteria
  }

  /// Search text as typed.
  pub fn search(&self) -> &str {
    &self.search
  }

  pub fn set_search(
    &mut self,
    text: &str
  ) {
    self.search = text.to_string();
  }

  pub fn is_unfiltered(&self) -> bool {
    self.search.is_empty()
      && self.category == Facet::Any
      && self.priority == Facet::Any
  }

  pub fn matches(
    &self,
    task: &Task
  ) -> bool {
    let category = self
      .category
      .matches(&task.category);
    let priority = self
      .priority
      .matches(&task.priority);
    let search = self.search.is_empty()
      || format!(
        "{} {}",
        task.title,
        task.description_or_empty()
      )
      .to_lowercase()
      .contains(&self.search.to_lowercase());

    trace!(
      id = %task.id,
      category,
      priority,
      search,
      "evaluated filter"
    );
    category && priority && search
  }

  /// Visible subset, insertion order
  /// preserved.
  pub fn visible<'a>(
    &self,
    tasks: &'a [Task]
  ) -> Vec<&'a Task> {
    tasks
      .iter()
      .filter(|task| self.matches(task))
      .collect()
  }
}

#[cfg(test)]
mod tests {
  use super::{
    Facet,
    FilterCriteria
  };
  use crate::task::{
    Task,
    TaskFields,
    TaskId
  };

  fn task(
    title: &str,
    description: Option<&str>,
    category: &str,
    priority: &str
  ) -> Task {
    Task::new(
      TaskId::from(title),
      TaskFields {
        title:       title.to_string(),
        description: description
          .map(str::to_string),
        category:    category
          .to_string(),
        priority:    priority
          .to_string(),
        due_date:    None
      }
    )
  }

  #[test]
  fn release_task_visibility() {
    let release = task(
      "Ship release",
      None,
      "Work",
      "High"
    );

    let narrowed = FilterCriteria::new(
      "ship", "all", "High"
    );
    assert!(narrowed.matches(&release));

    let personal = FilterCriteria::new(
      "", "Personal", "all"
    );
    assert!(!personal.matches(&release));
  }

  #[test]
  fn search_is_case_insensitive_over_description()
   {
    let t = task(
      "Groceries",
      Some("Buy OAT milk"),
      "Personal",
      "Low"
    );
    assert!(
      FilterCriteria::new(
        "oat MILK", "all", "all"
      )
      .matches(&t)
    );
    assert!(
      !FilterCriteria::new(
        "coffee", "all", "all"
      )
      .matches(&t)
    );
  }

  #[test]
  fn search_text_is_kept_as_typed() {
    let t = task(
      "Ship it",
      None,
      "Work",
      "High"
    );
    let mut criteria = FilterCriteria::new(
      "Ship It", "all", "all"
    );
    assert_eq!(criteria.search(), "Ship It");
    assert!(criteria.matches(&t));

    criteria.set_search("SHIP");
    assert_eq!(criteria.search(), "SHIP");
    assert!(criteria.matches(&t));
  }

  #[test]
  fn only_all_is_the_wildcard() {
    let t =
      task("x", None, "Work", "High");
    assert_eq!(
      Facet::parse(""),
      Facet::Exact(String::new())
    );
    assert!(
      !FilterCriteria::new("", "", "all")
        .matches(&t)
    );
    assert!(
      FilterCriteria::new("", "all", "all")
        .matches(&t)
    );
  }

  #[test]
  fn facets_compare_exactly() {
    let t =
      task("x", None, "Work", "High");
    assert!(
      !FilterCriteria::new(
        "", "work", "all"
      )
      .matches(&t)
    );
    assert_eq!(
      Facet::parse("all"),
      Facet::Any
    );
    assert_eq!(
      Facet::parse("Work").as_str(),
      "Work"
    );
  }

  #[test]
  fn visible_keeps_insertion_order() {
    let tasks = vec![
      task("b", None, "Work", "Low"),
      task("a", None, "Home", "Low"),
      task("c", None, "Work", "High"),
    ];
    let criteria = FilterCriteria::new(
      "", "Work", "all"
    );
    let titles: Vec<&str> = criteria
      .visible(&tasks)
      .into_iter()
      .map(|t| t.title.as_str())
      .collect();
    assert_eq!(titles, vec!["b", "c"]);
    assert!(
      FilterCriteria::default()
        .is_unfiltered()
    );
  }
}

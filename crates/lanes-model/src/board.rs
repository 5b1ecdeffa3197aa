use std::collections::BTreeSet;

use chrono::NaiveDate;
use tracing::{
  debug,
  info
};

use crate::filter::{
  Facet,
  FilterCriteria
};
use crate::form::{
  FormController,
  FormOutcome
};
use crate::stage::Stage;
use crate::storage::KeyValueStore;
use crate::store::TaskStore;
use crate::task::{
  Task,
  TaskId
};

/// One rendered task in a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
  pub task:              Task,
  /// Position inside its column,
  /// drives the entry stagger.
  pub position:          usize,
  pub can_move_previous: bool,
  pub can_move_next:     bool,
  pub overdue:           bool,
  pub due_label:         String,
  pub priority_class:    String,
  pub deleting:          bool
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
  pub stage: Stage,
  pub cards: Vec<Card>
}

impl Column {
  /// Visible tasks in this stage, not
  /// the unfiltered total.
  pub fn count(&self) -> usize {
    self.cards.len()
  }
}

/// All mutable board state behind one
/// owner: the tasks, the filter, the
/// form and cards awaiting removal.
#[derive(Debug, Clone)]
pub struct BoardState<S> {
  store:    TaskStore<S>,
  criteria: FilterCriteria,
  form:     FormController,
  deleting: BTreeSet<TaskId>
}

impl<S: KeyValueStore> BoardState<S> {
  #[tracing::instrument(skip(storage))]
  pub fn open(storage: S) -> Self {
    let store = TaskStore::load(storage);
    Self {
      store,
      criteria: FilterCriteria::default(),
      form: FormController::new(),
      deleting: BTreeSet::new()
    }
  }

  pub fn store(&self) -> &TaskStore<S> {
    &self.store
  }

  pub fn task(
    &self,
    id: &TaskId
  ) -> Option<&Task> {
    self.store.get(id)
  }

  pub fn criteria(
    &self
  ) -> &FilterCriteria {
    &self.criteria
  }

  pub fn set_criteria(
    &mut self,
    criteria: FilterCriteria
  ) {
    debug!(?criteria, "replacing filter");
    self.criteria = criteria;
  }

  pub fn set_search(
    &mut self,
    text: &str
  ) {
    self.criteria.set_search(text);
  }

  pub fn set_category(
    &mut self,
    raw: &str
  ) {
    self.criteria.category =
      Facet::parse(raw);
  }

  pub fn set_priority(
    &mut self,
    raw: &str
  ) {
    self.criteria.priority =
      Facet::parse(raw);
  }

  pub fn form(&self) -> &FormController {
    &self.form
  }

  pub fn form_mut(
    &mut self
  ) -> &mut FormController {
    &mut self.form
  }

  pub fn open_new_form(&mut self) {
    self.form.open_new();
  }

  /// Returns false when the task no
  /// longer exists.
  pub fn open_edit_form(
    &mut self,
    id: &TaskId
  ) -> bool {
    match self.store.get(id) {
      | Some(task) => {
        self.form.open_edit(task);
        true
      }
      | None => false
    }
  }

  pub fn close_form(&mut self) {
    self.form.close();
  }

  pub fn submit_form(
    &mut self
  ) -> anyhow::Result<FormOutcome> {
    self.form.submit(&mut self.store)
  }

  pub fn move_next(
    &mut self,
    id: &TaskId
  ) -> anyhow::Result<bool> {
    self.store.move_next(id)
  }

  pub fn move_previous(
    &mut self,
    id: &TaskId
  ) -> anyhow::Result<bool> {
    self.store.move_previous(id)
  }

  /// Marks a card for removal. The
  /// store is untouched until
  /// `commit_delete`.
  pub fn begin_delete(
    &mut self,
    id: &TaskId
  ) -> bool {
    if self.store.get(id).is_none() {
      return false;
    }
    self.deleting.insert(id.clone())
  }

  pub fn is_deleting(
    &self,
    id: &TaskId
  ) -> bool {
    self.deleting.contains(id)
  }

  /// Removes a task previously marked
  /// by `begin_delete`, at most once.
  #[tracing::instrument(skip(self), fields(id = %id))]
  pub fn commit_delete(
    &mut self,
    id: &TaskId
  ) -> anyhow::Result<bool> {
    if !self.deleting.remove(id) {
      debug!(
        "delete commit without a \
         pending mark ignored"
      );
      return Ok(false);
    }
    let removed =
      self.store.remove(id)?;
    info!(removed, "committed delete");
    Ok(removed)
  }

  /// Mark and commit with no delay in
  /// between.
  pub fn delete_now(
    &mut self,
    id: &TaskId
  ) -> anyhow::Result<bool> {
    if !self.begin_delete(id) {
      return Ok(false);
    }
    self.commit_delete(id)
  }

  pub fn visible(&self) -> Vec<&Task> {
    self
      .criteria
      .visible(self.store.all())
  }

  pub fn columns(
    &self,
    today: NaiveDate
  ) -> Vec<Column> {
    let visible = self.visible();
    Stage::ALL
      .iter()
      .map(|&stage| {
        let cards = visible
          .iter()
          .filter(|task| {
            task.status == stage
          })
          .enumerate()
          .map(|(position, task)| {
            Card {
              task: (*task).clone(),
              position,
              can_move_previous: !stage
                .is_first(),
              can_move_next: !stage
                .is_last(),
              overdue: task
                .is_overdue(today),
              due_label: task
                .due_label(),
              priority_class: task
                .priority_class(),
              deleting: self
                .deleting
                .contains(&task.id)
            }
          })
          .collect();
        Column {
          stage,
          cards
        }
      })
      .collect()
  }

  /// Distinct non-empty categories in
  /// the collection, sorted.
  pub fn categories(
    &self
  ) -> Vec<String> {
    distinct(
      self
        .store
        .all()
        .iter()
        .map(|task| task.category.as_str())
    )
  }

  pub fn priorities(
    &self
  ) -> Vec<String> {
    distinct(
      self
        .store
        .all()
        .iter()
        .map(|task| task.priority.as_str())
    )
  }
}

fn distinct<'a>(
  values: impl Iterator<Item = &'a str>
) -> Vec<String> {
  values
    .filter(|value| !value.is_empty())
    .collect::<BTreeSet<_>>()
    .into_iter()
    .map(str::to_string)
    .collect()
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::BoardState;
  use crate::filter::FilterCriteria;
  use crate::form::FormOutcome;
  use crate::stage::Stage;
  use crate::storage::MemoryStorage;
  use crate::store::TaskStore;
  use crate::task::TaskId;

  fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 4, 10)
      .unwrap()
  }

  fn add(
    board: &mut BoardState<
      MemoryStorage
    >,
    title: &str,
    category: &str
  ) -> TaskId {
    board.open_new_form();
    let draft =
      board.form_mut().draft_mut();
    draft.title = title.to_string();
    draft.category =
      category.to_string();
    match board.submit_form().unwrap()
    {
      | FormOutcome::Created(id) => id,
      | other => {
        panic!("unexpected {other:?}")
      }
    }
  }

  #[test]
  fn counts_follow_the_filter() {
    let mut board = BoardState::open(
      MemoryStorage::new()
    );
    add(&mut board, "a", "Work");
    add(&mut board, "b", "Home");
    add(&mut board, "c", "Home");

    let all = board.columns(today());
    assert_eq!(all[0].count(), 3);

    board.set_category("Work");
    let columns = board.columns(today());
    assert_eq!(
      columns[0].stage,
      Stage::Todo
    );
    assert_eq!(columns[0].count(), 1);
    assert_eq!(columns[1].count(), 0);
    assert_eq!(columns[2].count(), 0);
  }

  #[test]
  fn cards_expose_move_affordances() {
    let mut board = BoardState::open(
      MemoryStorage::new()
    );
    let first =
      add(&mut board, "first", "Work");
    let second =
      add(&mut board, "second", "Work");
    board.move_next(&second).unwrap();
    board.move_next(&second).unwrap();

    let columns = board.columns(today());
    let todo = &columns[0].cards[0];
    assert_eq!(todo.task.id, first);
    assert!(!todo.can_move_previous);
    assert!(todo.can_move_next);

    let done = &columns[2].cards[0];
    assert!(done.can_move_previous);
    assert!(!done.can_move_next);
    assert_eq!(done.position, 0);
  }

  #[test]
  fn overdue_and_due_label_on_cards() {
    let mut board = BoardState::open(
      MemoryStorage::new()
    );
    board.open_new_form();
    let draft =
      board.form_mut().draft_mut();
    draft.title = "late".to_string();
    draft.due_date =
      "2026-04-01".to_string();
    board.submit_form().unwrap();

    let card =
      &board.columns(today())[0].cards[0];
    assert!(card.overdue);
    assert_eq!(
      card.due_label,
      "Apr 1, 2026"
    );
    assert_eq!(
      card.priority_class,
      "medium"
    );
  }

  #[test]
  fn delete_commits_once_after_mark() {
    let storage = MemoryStorage::new();
    let mut board =
      BoardState::open(storage.clone());
    let id =
      add(&mut board, "bye", "Work");
    let keep =
      add(&mut board, "stay", "Work");

    assert!(!board.commit_delete(&id).unwrap());
    assert!(board.begin_delete(&id));
    assert!(
      board.columns(today())[0].cards[0]
        .deleting
    );
    assert_eq!(board.store().len(), 2);

    assert!(board.commit_delete(&id).unwrap());
    assert!(!board.commit_delete(&id).unwrap());
    assert!(board.task(&id).is_none());

    let reloaded =
      TaskStore::load(storage);
    assert_eq!(reloaded.len(), 1);
    assert!(reloaded.get(&keep).is_some());
  }

  #[test]
  fn deleting_unknown_id_changes_nothing()
   {
    let mut board = BoardState::open(
      MemoryStorage::new()
    );
    add(&mut board, "only", "Work");
    let ghost = TaskId::from("ghost");
    assert!(!board.begin_delete(&ghost));
    assert!(!board.delete_now(&ghost).unwrap());
    assert_eq!(board.store().len(), 1);
  }

  #[test]
  fn distinct_facet_values() {
    let mut board = BoardState::open(
      MemoryStorage::new()
    );
    add(&mut board, "a", "Work");
    add(&mut board, "b", "Home");
    add(&mut board, "c", "Work");
    assert_eq!(
      board.categories(),
      vec!["Home", "Work"]
    );
    assert_eq!(
      board.priorities(),
      vec!["Medium"]
    );

    board.set_criteria(
      FilterCriteria::new(
        "A", "all", "all"
      )
    );
    assert_eq!(board.visible().len(), 1);
  }
}

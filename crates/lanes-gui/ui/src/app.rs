use std::collections::BTreeSet;
use std::rc::Rc;

use chrono::NaiveDate;
use gloo::timers::future::TimeoutFuture;
use lanes_model::form::{
  CATEGORY_CHOICES,
  PRIORITY_CHOICES
};
use lanes_model::{
  BoardState,
  FormOutcome,
  TaskId,
  Theme,
  ThemeController
};
use yew::{
  Callback,
  Html,
  Reducible,
  function_component,
  html,
  use_effect_with,
  use_reducer
};

use crate::components::{
  BoardColumn,
  FilterBar,
  TaskModal
};
use crate::storage::{
  LocalStorage,
  prefers_dark,
  today
};

/// Time a card spends in its leaving
/// state before the store drops it.
const DELETE_DELAY_MS: u32 = 350;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DraftField {
  Title,
  Description,
  Category,
  Priority,
  DueDate
}

#[derive(Debug, Clone, PartialEq)]
pub enum BoardAction {
  Search(String),
  Category(String),
  Priority(String),
  OpenNew,
  OpenEdit(TaskId),
  CloseForm,
  Draft(DraftField, String),
  Submit,
  MoveNext(TaskId),
  MovePrevious(TaskId),
  BeginDelete(TaskId),
  CommitDelete(TaskId),
  ToggleTheme
}

#[derive(Debug, Clone)]
pub struct BoardModel {
  board: BoardState<LocalStorage>,
  theme: ThemeController<LocalStorage>,
  today: NaiveDate
}

impl BoardModel {
  fn load() -> Self {
    Self {
      board: BoardState::open(
        LocalStorage
      ),
      theme: ThemeController::init(
        LocalStorage,
        prefers_dark()
      ),
      today: today()
    }
  }

  fn apply(
    &mut self,
    action: BoardAction
  ) -> anyhow::Result<()> {
    match action {
      | BoardAction::Search(text) => {
        self.board.set_search(&text)
      }
      | BoardAction::Category(raw) => {
        self.board.set_category(&raw)
      }
      | BoardAction::Priority(raw) => {
        self.board.set_priority(&raw)
      }
      | BoardAction::OpenNew => {
        self.board.open_new_form()
      }
      | BoardAction::OpenEdit(id) => {
        if !self.board.open_edit_form(&id)
        {
          tracing::debug!(%id, "edit for vanished task ignored");
        }
      }
      | BoardAction::CloseForm => {
        self.board.close_form()
      }
      | BoardAction::Draft(
        field,
        value
      ) => {
        let draft = self
          .board
          .form_mut()
          .draft_mut();
        let slot = match field {
          | DraftField::Title => {
            &mut draft.title
          }
          | DraftField::Description => {
            &mut draft.description
          }
          | DraftField::Category => {
            &mut draft.category
          }
          | DraftField::Priority => {
            &mut draft.priority
          }
          | DraftField::DueDate => {
            &mut draft.due_date
          }
        };
        *slot = value;
        draft.error = None;
      }
      | BoardAction::Submit => {
        let outcome =
          self.board.submit_form()?;
        tracing::info!(?outcome, "form submitted");
        if let FormOutcome::Stale(id) =
          outcome
        {
          tracing::warn!(%id, "edited task was deleted meanwhile");
        }
      }
      | BoardAction::MoveNext(id) => {
        self.board.move_next(&id)?;
      }
      | BoardAction::MovePrevious(id) => {
        self.board.move_previous(&id)?;
      }
      | BoardAction::BeginDelete(id) => {
        self.board.begin_delete(&id);
      }
      | BoardAction::CommitDelete(id) => {
        self.board.commit_delete(&id)?;
      }
      | BoardAction::ToggleTheme => {
        self.theme.toggle()?;
      }
    }
    Ok(())
  }
}

impl Reducible for BoardModel {
  type Action = BoardAction;

  fn reduce(
    self: Rc<Self>,
    action: Self::Action
  ) -> Rc<Self> {
    let mut next =
      Rc::unwrap_or_clone(self);
    next.today = today();
    let label = format!("{action:?}");
    if let Err(error) = next.apply(action)
    {
      tracing::error!(
        error = %format!("{error:#}"),
        action = %label,
        "board action failed"
      );
    }
    Rc::new(next)
  }
}

/// Built-in choices first, then
/// anything already used on the board.
fn facet_options(
  builtin: &[&str],
  used: Vec<String>
) -> Vec<String> {
  let mut seen = BTreeSet::new();
  builtin
    .iter()
    .map(|value| value.to_string())
    .chain(used)
    .filter(|value| {
      seen.insert(value.clone())
    })
    .collect()
}

#[function_component(App)]
pub fn app() -> Html {
  let model =
    use_reducer(BoardModel::load);

  {
    let theme = model.theme.current();
    use_effect_with(theme, |theme| {
      if let Some(root) =
        web_sys::window()
          .and_then(|window| {
            window.document()
          })
          .and_then(|document| {
            document.document_element()
          })
        && let Err(error) = root
          .set_attribute(
            "data-theme",
            theme.storage_value()
          )
      {
        tracing::warn!(
          ?error,
          "failed applying theme"
        );
      }
    });
  }

  let dispatch = |make: fn(
    String
  )
    -> BoardAction| {
    let model = model.clone();
    Callback::from(move |value: String| {
      model.dispatch(make(value))
    })
  };
  let on_search =
    dispatch(BoardAction::Search);
  let on_category =
    dispatch(BoardAction::Category);
  let on_priority =
    dispatch(BoardAction::Priority);

  let on_add = {
    let model = model.clone();
    Callback::from(move |_| {
      model.dispatch(BoardAction::OpenNew)
    })
  };
  let on_toggle_theme = {
    let model = model.clone();
    Callback::from(move |_| {
      model.dispatch(
        BoardAction::ToggleTheme
      )
    })
  };
  let on_move_next = {
    let model = model.clone();
    Callback::from(move |id: TaskId| {
      model.dispatch(
        BoardAction::MoveNext(id)
      )
    })
  };
  let on_move_previous = {
    let model = model.clone();
    Callback::from(move |id: TaskId| {
      model.dispatch(
        BoardAction::MovePrevious(id)
      )
    })
  };
  let on_edit = {
    let model = model.clone();
    Callback::from(move |id: TaskId| {
      model.dispatch(
        BoardAction::OpenEdit(id)
      )
    })
  };
  let on_delete = {
    let model = model.clone();
    Callback::from(move |id: TaskId| {
      model.dispatch(
        BoardAction::BeginDelete(
          id.clone()
        )
      );
      let model = model.clone();
      wasm_bindgen_futures::spawn_local(
        async move {
          TimeoutFuture::new(
            DELETE_DELAY_MS
          )
          .await;
          model.dispatch(
            BoardAction::CommitDelete(id)
          );
        }
      );
    })
  };
  let on_field = {
    let model = model.clone();
    Callback::from(
      move |(field, value): (
        DraftField,
        String
      )| {
        model.dispatch(
          BoardAction::Draft(field, value)
        )
      }
    )
  };
  let on_submit = {
    let model = model.clone();
    Callback::from(move |_| {
      model.dispatch(BoardAction::Submit)
    })
  };
  let on_close = {
    let model = model.clone();
    Callback::from(move |_| {
      model
        .dispatch(BoardAction::CloseForm)
    })
  };

  let board = &model.board;
  let criteria = board.criteria();
  let columns =
    board.columns(model.today);
  let category_options = facet_options(
    &CATEGORY_CHOICES,
    board.categories()
  );
  let priority_options = facet_options(
    &PRIORITY_CHOICES,
    board.priorities()
  );
  let theme_icon =
    match model.theme.current() {
      | Theme::Light => "☀",
      | Theme::Dark => "☾"
    };

  html! {
      <div class="app">
          <header class="board-header">
              <h1>{ "Task Board" }</h1>
              <FilterBar
                  search={criteria.search().to_string()}
                  category={criteria.category.as_str().to_string()}
                  priority={criteria.priority.as_str().to_string()}
                  category_options={category_options.clone()}
                  priority_options={priority_options.clone()}
                  on_search={on_search}
                  on_category={on_category}
                  on_priority={on_priority}
              />
              <button id="theme-toggle" class="btn icon" title="Toggle theme" onclick={on_toggle_theme}>{ theme_icon }</button>
              <button id="add-task-btn" class="btn primary" onclick={on_add}>{ "Add Task" }</button>
          </header>
          <main class="kanban-board">
              {
                  for columns.into_iter().map(|column| {
                      let stage_key = column.stage.as_str();
                      html! {
                          <BoardColumn
                              key={stage_key}
                              column={column}
                              on_move_next={on_move_next.clone()}
                              on_move_previous={on_move_previous.clone()}
                              on_edit={on_edit.clone()}
                              on_delete={on_delete.clone()}
                          />
                      }
                  })
              }
          </main>
          {
              if board.form().is_open() {
                  html! {
                      <TaskModal
                          heading={board.form().heading()}
                          draft={board.form().draft().clone()}
                          category_options={category_options}
                          priority_options={priority_options}
                          on_field={on_field}
                          on_submit={on_submit}
                          on_close={on_close}
                      />
                  }
              } else {
                  html! {}
              }
          }
      </div>
  }
}

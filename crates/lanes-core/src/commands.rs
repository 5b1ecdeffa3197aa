use anyhow::anyhow;
use chrono::NaiveDate;
use lanes_model::{
  BoardState,
  FilterCriteria,
  FormOutcome,
  KeyValueStore,
  Task,
  TaskId,
  Theme,
  ThemeController
};
use tracing::{
  debug,
  info,
  instrument
};

use crate::cli::{
  AddArgs,
  BoardArgs,
  Command,
  EditArgs,
  ThemeAction
};
use crate::render::{
  Renderer,
  short_id
};

#[instrument(skip(
  board, theme, renderer, command
))]
pub fn dispatch<S: KeyValueStore>(
  board: &mut BoardState<S>,
  theme: &mut ThemeController<S>,
  renderer: &Renderer,
  command: Command,
  today: NaiveDate
) -> anyhow::Result<()> {
  debug!(?command, "dispatching command");

  match command {
    | Command::Board(args) => {
      cmd_board(
        board, renderer, &args, today
      )
    }
    | Command::Add(args) => {
      cmd_add(board, &args)
    }
    | Command::Edit(args) => {
      cmd_edit(board, &args)
    }
    | Command::Next {
      id
    } => cmd_move(board, &id, true),
    | Command::Prev {
      id
    } => cmd_move(board, &id, false),
    | Command::Delete {
      id
    } => cmd_delete(board, &id),
    | Command::Show {
      id
    } => cmd_show(board, renderer, &id),
    | Command::Theme {
      action
    } => {
      cmd_theme(theme, action)
    }
  }
}

/// Exact id, else a unique prefix.
/// Unknown input passes through so the
/// store can ignore it.
pub fn resolve_id(
  tasks: &[Task],
  raw: &str
) -> anyhow::Result<TaskId> {
  let raw = raw.trim();
  if let Some(task) = tasks
    .iter()
    .find(|task| task.id.as_str() == raw)
  {
    return Ok(task.id.clone());
  }

  let mut matches = tasks.iter().filter(
    |task| {
      !raw.is_empty()
        && task
          .id
          .as_str()
          .starts_with(raw)
    }
  );
  match (matches.next(), matches.next())
  {
    | (Some(task), None) => {
      Ok(task.id.clone())
    }
    | (Some(_), Some(_)) => {
      Err(anyhow!(
        "ambiguous task id prefix: \
         {raw}"
      ))
    }
    | (None, _) => {
      debug!(raw, "no task matches id");
      Ok(TaskId::from(raw))
    }
  }
}

fn all_ids<S: KeyValueStore>(
  board: &BoardState<S>
) -> Vec<&str> {
  board
    .store()
    .all()
    .iter()
    .map(|task| task.id.as_str())
    .collect()
}

#[instrument(skip(
  board, renderer, args
))]
fn cmd_board<S: KeyValueStore>(
  board: &mut BoardState<S>,
  renderer: &Renderer,
  args: &BoardArgs,
  today: NaiveDate
) -> anyhow::Result<()> {
  board.set_criteria(
    FilterCriteria::new(
      &args.search,
      &args.category,
      &args.priority
    )
  );
  let columns = board.columns(today);
  renderer
    .print_board(&columns, &all_ids(board))
}

#[instrument(skip(board, args))]
fn cmd_add<S: KeyValueStore>(
  board: &mut BoardState<S>,
  args: &AddArgs
) -> anyhow::Result<()> {
  info!("command add");

  board.open_new_form();
  let draft =
    board.form_mut().draft_mut();
  draft.title = args.title.join(" ");
  if let Some(description) =
    &args.description
  {
    draft.description =
      description.clone();
  }
  if let Some(category) = &args.category
  {
    draft.category = category.clone();
  }
  if let Some(priority) = &args.priority
  {
    draft.priority = priority.clone();
  }
  if let Some(due) = &args.due {
    draft.due_date = due.clone();
  }

  match board.submit_form()? {
    | FormOutcome::Created(id) => {
      println!(
        "Created task {}.",
        short_id(
          id.as_str(),
          &all_ids(board)
        )
      );
      Ok(())
    }
    | FormOutcome::Rejected => {
      Err(rejection(board))
    }
    | other => {
      Err(anyhow!(
        "unexpected form outcome: \
         {other:?}"
      ))
    }
  }
}

#[instrument(skip(board, args))]
fn cmd_edit<S: KeyValueStore>(
  board: &mut BoardState<S>,
  args: &EditArgs
) -> anyhow::Result<()> {
  info!("command edit");

  let id = resolve_id(
    board.store().all(),
    &args.id
  )?;
  if !board.open_edit_form(&id) {
    println!("Modified 0 task(s).");
    return Ok(());
  }

  let draft =
    board.form_mut().draft_mut();
  if let Some(title) = &args.title {
    draft.title = title.clone();
  }
  if let Some(description) =
    &args.description
  {
    draft.description =
      description.clone();
  }
  if let Some(category) = &args.category
  {
    draft.category = category.clone();
  }
  if let Some(priority) = &args.priority
  {
    draft.priority = priority.clone();
  }
  if let Some(due) = &args.due {
    draft.due_date =
      if due.eq_ignore_ascii_case("none")
      {
        String::new()
      } else {
        due.clone()
      };
  }

  match board.submit_form()? {
    | FormOutcome::Updated(_) => {
      println!("Modified 1 task(s).");
      Ok(())
    }
    | FormOutcome::Stale(_) => {
      println!("Modified 0 task(s).");
      Ok(())
    }
    | FormOutcome::Rejected => {
      Err(rejection(board))
    }
    | FormOutcome::Created(id) => {
      Err(anyhow!(
        "edit unexpectedly created \
         task {id}"
      ))
    }
  }
}

fn rejection<S: KeyValueStore>(
  board: &mut BoardState<S>
) -> anyhow::Error {
  let message = board
    .form()
    .draft()
    .error
    .clone()
    .unwrap_or_else(|| {
      "invalid task".to_string()
    });
  board.close_form();
  anyhow!(message)
}

#[instrument(skip(board))]
fn cmd_move<S: KeyValueStore>(
  board: &mut BoardState<S>,
  raw_id: &str,
  forward: bool
) -> anyhow::Result<()> {
  let id =
    resolve_id(board.store().all(), raw_id)?;
  let moved = if forward {
    board.move_next(&id)?
  } else {
    board.move_previous(&id)?
  };

  match board.task(&id) {
    | Some(task) if moved => {
      println!(
        "Moved task to {}.",
        task.status.label()
      );
    }
    | _ => println!("Modified 0 task(s).")
  }
  Ok(())
}

#[instrument(skip(board))]
fn cmd_delete<S: KeyValueStore>(
  board: &mut BoardState<S>,
  raw_id: &str
) -> anyhow::Result<()> {
  let id =
    resolve_id(board.store().all(), raw_id)?;
  let removed = board.delete_now(&id)?;
  println!(
    "Deleted {} task(s).",
    u8::from(removed)
  );
  Ok(())
}

#[instrument(skip(board, renderer))]
fn cmd_show<S: KeyValueStore>(
  board: &BoardState<S>,
  renderer: &Renderer,
  raw_id: &str
) -> anyhow::Result<()> {
  let id =
    resolve_id(board.store().all(), raw_id)?;
  let task =
    board.task(&id).ok_or_else(|| {
      anyhow!("no task matches {raw_id}")
    })?;
  renderer.print_task_info(task)
}

#[instrument(skip(theme))]
fn cmd_theme<S: KeyValueStore>(
  theme: &mut ThemeController<S>,
  action: ThemeAction
) -> anyhow::Result<()> {
  let current = match action {
    | ThemeAction::Show => theme.current(),
    | ThemeAction::Toggle => {
      theme.toggle()?
    }
    | ThemeAction::Light => {
      theme.set(Theme::Light)?;
      Theme::Light
    }
    | ThemeAction::Dark => {
      theme.set(Theme::Dark)?;
      Theme::Dark
    }
  };
  println!("{current}");
  Ok(())
}

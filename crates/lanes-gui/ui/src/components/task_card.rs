use lanes_model::{
  Card,
  TaskId
};
use yew::{
  Callback,
  Html,
  Properties,
  classes,
  function_component,
  html
};

use super::CardActions;

/// Entry animation offset per position.
const STAGGER_MS: usize = 50;

#[derive(Properties, PartialEq)]
pub struct TaskCardProps {
  pub card:             Card,
  pub on_move_next:     Callback<TaskId>,
  pub on_move_previous: Callback<TaskId>,
  pub on_edit:          Callback<TaskId>,
  pub on_delete:        Callback<TaskId>
}

#[function_component(TaskCard)]
pub fn task_card(
  props: &TaskCardProps
) -> Html {
  let card = &props.card;
  let task = &card.task;
  let style = format!(
    "animation-delay: {}ms",
    card.position * STAGGER_MS
  );

  html! {
      <div
          class={classes!("task-card", card.deleting.then_some("deleting"))}
          data-id={task.id.as_str().to_string()}
          {style}
      >
          <div class="task-header">
              <h3 class="task-title">{ &task.title }</h3>
              <span class={classes!("task-priority", card.priority_class.clone())}>{ &task.priority }</span>
          </div>
          {
              match task.description.as_deref().map(str::trim) {
                  Some(text) if !text.is_empty() => html! {
                      <p class="task-description">{ text }</p>
                  },
                  _ => html! {}
              }
          }
          <div class="task-meta">
              <span class="task-category">{ &task.category }</span>
              <span class={classes!("task-due", card.overdue.then_some("overdue"))}>{ &card.due_label }</span>
          </div>
          <CardActions
              id={task.id.clone()}
              can_move_previous={card.can_move_previous}
              can_move_next={card.can_move_next}
              on_move_next={props.on_move_next.clone()}
              on_move_previous={props.on_move_previous.clone()}
              on_edit={props.on_edit.clone()}
              on_delete={props.on_delete.clone()}
          />
      </div>
  }
}

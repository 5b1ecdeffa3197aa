use lanes_model::TaskId;
use web_sys::MouseEvent;
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct CardActionsProps {
  pub id:                TaskId,
  pub can_move_previous: bool,
  pub can_move_next:     bool,
  pub on_move_next:      Callback<TaskId>,
  pub on_move_previous:  Callback<TaskId>,
  pub on_edit:           Callback<TaskId>,
  pub on_delete:         Callback<TaskId>
}

fn emit_id(
  callback: &Callback<TaskId>,
  id: &TaskId
) -> Callback<MouseEvent> {
  let callback = callback.clone();
  let id = id.clone();
  Callback::from(move |_| {
    callback.emit(id.clone())
  })
}

#[function_component(CardActions)]
pub fn card_actions(
  props: &CardActionsProps
) -> Html {
  html! {
      <div class="task-actions">
          {
              if props.can_move_previous {
                  html! {
                      <button class="btn move-prev" title="Move back" onclick={emit_id(&props.on_move_previous, &props.id)}>{ "←" }</button>
                  }
              } else {
                  html! {}
              }
          }
          {
              if props.can_move_next {
                  html! {
                      <button class="btn move-next" title="Move forward" onclick={emit_id(&props.on_move_next, &props.id)}>{ "→" }</button>
                  }
              } else {
                  html! {}
              }
          }
          <button class="btn edit" title="Edit" onclick={emit_id(&props.on_edit, &props.id)}>{ "Edit" }</button>
          <button class="btn delete" title="Delete" onclick={emit_id(&props.on_delete, &props.id)}>{ "Delete" }</button>
      </div>
  }
}

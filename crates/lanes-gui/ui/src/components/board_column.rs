use lanes_model::{
  Column,
  TaskId
};
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

use super::TaskCard;

#[derive(Properties, PartialEq)]
pub struct BoardColumnProps {
  pub column:           Column,
  pub on_move_next:     Callback<TaskId>,
  pub on_move_previous: Callback<TaskId>,
  pub on_edit:          Callback<TaskId>,
  pub on_delete:        Callback<TaskId>
}

#[function_component(BoardColumn)]
pub fn board_column(
  props: &BoardColumnProps
) -> Html {
  let column = &props.column;

  html! {
      <section class="column" data-status={column.stage.as_str()}>
          <div class="column-header">
              <h2>{ column.stage.label() }</h2>
              <span class="task-count">{ column.count() }</span>
          </div>
          <div class="task-list">
              {
                  if column.cards.is_empty() {
                      html! { <div class="empty-state">{ "No tasks" }</div> }
                  } else {
                      html! {
                          <>{ for column.cards.iter().map(|card| html! {
                              <TaskCard
                                  key={card.task.id.as_str()}
                                  card={card.clone()}
                                  on_move_next={props.on_move_next.clone()}
                                  on_move_previous={props.on_move_previous.clone()}
                                  on_edit={props.on_edit.clone()}
                                  on_delete={props.on_delete.clone()}
                              />
                          }) }</>
                      }
                  }
              }
          </div>
      </section>
  }
}

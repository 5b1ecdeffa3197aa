use lanes_model::FormDraft;
use web_sys::{
  HtmlInputElement,
  HtmlSelectElement,
  HtmlTextAreaElement,
  InputEvent,
  MouseEvent,
  SubmitEvent
};
use yew::{
  Callback,
  Event,
  Html,
  Properties,
  TargetCast,
  function_component,
  html
};

use crate::app::DraftField;

#[derive(Properties, PartialEq)]
pub struct TaskModalProps {
  pub heading:          &'static str,
  pub draft:            FormDraft,
  pub category_options: Vec<String>,
  pub priority_options: Vec<String>,
  pub on_field:
    Callback<(DraftField, String)>,
  pub on_submit:        Callback<()>,
  pub on_close:         Callback<()>
}

fn on_input(
  on_field: &Callback<(
    DraftField,
    String
  )>,
  field: DraftField
) -> Callback<InputEvent> {
  let on_field = on_field.clone();
  Callback::from(move |e: InputEvent| {
    let value = match field {
      | DraftField::Description => {
        e.target_unchecked_into::<HtmlTextAreaElement>()
          .value()
      }
      | _ => {
        e.target_unchecked_into::<HtmlInputElement>()
          .value()
      }
    };
    on_field.emit((field, value));
  })
}

fn on_select(
  on_field: &Callback<(
    DraftField,
    String
  )>,
  field: DraftField
) -> Callback<Event> {
  let on_field = on_field.clone();
  Callback::from(move |e: Event| {
    let select: HtmlSelectElement =
      e.target_unchecked_into();
    on_field.emit((field, select.value()));
  })
}

/// Options for a select, keeping a
/// value that is not among them.
fn choices(
  options: &[String],
  selected: &str
) -> Html {
  let extra = (!options
    .iter()
    .any(|option| option == selected))
  .then(|| selected.to_string());
  html! {
      <>
          {
              for options.iter().cloned().chain(extra).map(|option| html! {
                  <option value={option.clone()} selected={option == selected}>{ option }</option>
              })
          }
      </>
  }
}

#[function_component(TaskModal)]
pub fn task_modal(
  props: &TaskModalProps
) -> Html {
  let draft = &props.draft;

  let onsubmit = {
    let on_submit =
      props.on_submit.clone();
    Callback::from(
      move |e: SubmitEvent| {
        e.prevent_default();
        on_submit.emit(());
      }
    )
  };
  let close = {
    let on_close = props.on_close.clone();
    Callback::from(move |_: MouseEvent| {
      on_close.emit(())
    })
  };
  let backdrop = {
    let on_close = props.on_close.clone();
    Callback::from(move |e: MouseEvent| {
      if e.target() == e.current_target() {
        on_close.emit(());
      }
    })
  };

  html! {
      <div class="modal active" onclick={backdrop}>
          <div class="modal-content">
              <div class="modal-header">
                  <h2 id="modal-title">{ props.heading }</h2>
                  <button class="btn icon close-modal" type="button" onclick={close.clone()}>{ "×" }</button>
              </div>
              <form id="task-form" {onsubmit}>
                  <label for="task-title">{ "Title" }</label>
                  <input
                      id="task-title"
                      type="text"
                      value={draft.title.clone()}
                      oninput={on_input(&props.on_field, DraftField::Title)}
                  />
                  <label for="task-description">{ "Description" }</label>
                  <textarea
                      id="task-description"
                      value={draft.description.clone()}
                      oninput={on_input(&props.on_field, DraftField::Description)}
                  />
                  <div class="form-row">
                      <label for="task-category">{ "Category" }</label>
                      <select id="task-category" onchange={on_select(&props.on_field, DraftField::Category)}>
                          { choices(&props.category_options, &draft.category) }
                      </select>
                      <label for="task-priority">{ "Priority" }</label>
                      <select id="task-priority" onchange={on_select(&props.on_field, DraftField::Priority)}>
                          { choices(&props.priority_options, &draft.priority) }
                      </select>
                  </div>
                  <label for="task-due-date">{ "Due Date" }</label>
                  <input
                      id="task-due-date"
                      type="date"
                      value={draft.due_date.clone()}
                      oninput={on_input(&props.on_field, DraftField::DueDate)}
                  />
                  {
                      match &draft.error {
                          Some(error) => html! { <p class="form-error">{ error }</p> },
                          None => html! {}
                      }
                  }
                  <div class="form-actions">
                      <button class="btn" type="button" onclick={close}>{ "Cancel" }</button>
                      <button class="btn primary" type="submit">{ "Save Task" }</button>
                  </div>
              </form>
          </div>
      </div>
  }
}

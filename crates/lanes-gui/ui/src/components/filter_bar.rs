use web_sys::{
  HtmlInputElement,
  HtmlSelectElement,
  InputEvent
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

use super::facet_choices;

#[derive(Properties, PartialEq)]
pub struct FilterBarProps {
  pub search:           String,
  pub category:         String,
  pub priority:         String,
  pub category_options: Vec<String>,
  pub priority_options: Vec<String>,
  pub on_search:        Callback<String>,
  pub on_category:      Callback<String>,
  pub on_priority:      Callback<String>
}

fn select_value(
  callback: &Callback<String>
) -> Callback<Event> {
  let callback = callback.clone();
  Callback::from(move |e: Event| {
    let select: HtmlSelectElement =
      e.target_unchecked_into();
    callback.emit(select.value());
  })
}

#[function_component(FilterBar)]
pub fn filter_bar(
  props: &FilterBarProps
) -> Html {
  let oninput = {
    let on_search =
      props.on_search.clone();
    Callback::from(
      move |e: InputEvent| {
        let input: HtmlInputElement =
          e.target_unchecked_into();
        on_search.emit(input.value());
      }
    )
  };

  html! {
      <div class="filter-bar">
          <input
              id="search-input"
              type="search"
              placeholder="Search tasks..."
              value={props.search.clone()}
              {oninput}
          />
          <select id="category-filter" onchange={select_value(&props.on_category)}>
              { facet_choices("All Categories", &props.category_options, &props.category) }
          </select>
          <select id="priority-filter" onchange={select_value(&props.on_priority)}>
              { facet_choices("All Priorities", &props.priority_options, &props.priority) }
          </select>
      </div>
  }
}

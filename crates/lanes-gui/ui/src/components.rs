mod board_column;
mod card_actions;
mod filter_bar;
mod task_card;
mod task_modal;

pub use board_column::BoardColumn;
pub use card_actions::CardActions;
pub use filter_bar::FilterBar;
pub use task_card::TaskCard;
pub use task_modal::TaskModal;

use yew::{
  Html,
  html
};

/// `<option>` list for a facet
/// dropdown, wildcard first.
pub(crate) fn facet_choices(
  wildcard_label: &str,
  options: &[String],
  selected: &str
) -> Html {
  html! {
      <>
          <option value={lanes_model::filter::WILDCARD} selected={selected == lanes_model::filter::WILDCARD}>{ wildcard_label }</option>
          {
              for options.iter().map(|option| html! {
                  <option value={option.clone()} selected={selected == option}>{ option }</option>
              })
          }
      </>
  }
}

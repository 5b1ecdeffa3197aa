//! Platform-neutral task board: tasks, stages, filtering, the create/edit
//! form and the column projection shared by the terminal and browser
//! front ends.

pub mod board;
pub mod filter;
pub mod form;
pub mod stage;
pub mod storage;
pub mod store;
pub mod task;
pub mod theme;

pub use board::{BoardState, Card, Column};
pub use filter::{Facet, FilterCriteria};
pub use form::{FormController, FormDraft, FormOutcome};
pub use stage::Stage;
pub use storage::{KeyValueStore, MemoryStorage};
pub use store::TaskStore;
pub use task::{Task, TaskFields, TaskId};
pub use theme::{Theme, ThemeController};

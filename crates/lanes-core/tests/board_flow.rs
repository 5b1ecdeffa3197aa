use chrono::NaiveDate;
use lanes_core::datastore::FileStorage;
use lanes_model::{BoardState, FormOutcome, KeyValueStore, Stage, TaskStore, Theme, ThemeController};
use tempfile::tempdir;

fn add(board: &mut BoardState<FileStorage>, title: &str, category: &str) -> lanes_model::TaskId {
    board.open_new_form();
    let draft = board.form_mut().draft_mut();
    draft.title = title.to_string();
    draft.category = category.to_string();
    match board.submit_form().expect("submit form") {
        FormOutcome::Created(id) => id,
        other => panic!("unexpected outcome {other:?}"),
    }
}

#[test]
fn board_survives_reopening_the_data_dir() {
    let temp = tempdir().expect("tempdir");
    let storage = FileStorage::open(temp.path()).expect("open datastore");
    let mut board = BoardState::open(storage);

    let release = add(&mut board, "Ship release", "Work");
    add(&mut board, "Water plants", "Personal");
    board.move_next(&release).expect("move");

    let reopened = TaskStore::load(FileStorage::open(temp.path()).expect("reopen"));
    assert_eq!(reopened.all(), board.store().all());
    assert_eq!(reopened.get(&release).expect("task").status, Stage::InProgress);

    let raw = std::fs::read_to_string(temp.path().join("tasks.data")).expect("read tasks");
    let json: serde_json::Value = serde_json::from_str(&raw).expect("json");
    assert_eq!(json[0]["status"], "inprogress");
    assert_eq!(json[1]["category"], "Personal");
}

#[test]
fn corrupt_tasks_file_starts_an_empty_board() {
    let temp = tempdir().expect("tempdir");
    std::fs::write(temp.path().join("tasks.data"), "[{\"id\":").expect("write garbage");

    let board = BoardState::open(FileStorage::open(temp.path()).expect("open datastore"));
    assert!(board.store().is_empty());
}

#[test]
fn filtered_counts_and_delete_round_trip() {
    let temp = tempdir().expect("tempdir");
    let storage = FileStorage::open(temp.path()).expect("open datastore");
    let mut board = BoardState::open(storage.clone());

    let work = add(&mut board, "Quarterly plan", "Work");
    add(&mut board, "Dentist", "Personal");
    add(&mut board, "Gym", "Personal");

    board.set_category("Work");
    let today = NaiveDate::from_ymd_opt(2026, 6, 1).expect("date");
    let columns = board.columns(today);
    assert_eq!(columns[0].count(), 1);
    assert_eq!(board.store().len(), 3);

    assert!(board.delete_now(&work).expect("delete"));
    assert!(!board.delete_now(&work).expect("delete again"));

    let reopened = TaskStore::load(storage);
    assert_eq!(reopened.len(), 2);
    assert!(reopened.get(&work).is_none());
}

#[test]
fn theme_is_stored_beside_tasks() {
    let temp = tempdir().expect("tempdir");
    let storage = FileStorage::open(temp.path()).expect("open datastore");

    let mut theme = ThemeController::init(storage.clone(), true);
    assert_eq!(theme.current(), Theme::Dark);
    theme.toggle().expect("toggle");

    assert_eq!(storage.get("theme").expect("read theme").as_deref(), Some("light"));
    let again = ThemeController::init(FileStorage::open(temp.path()).expect("reopen"), true);
    assert_eq!(again.current(), Theme::Light);
}

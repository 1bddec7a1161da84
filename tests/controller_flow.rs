// Tests for the load -> operate -> save cycle against a real file.
use chrono::Local;
use std::fs;
use tempfile::TempDir;
use todo_txt::controller::{ListOptions, TodoController};
use todo_txt::{ErrorKind, TodoError};

const TODO: &str = "Post signs around the neighborhood +GarageSale\n\
(B) Schedule Goodwill pickup +GarageSale @phone\n\
(A) Thank Mom for the meatballs @phone\n\
@GroceryStore Eskimo pies\n\
x 2011-03-03 Call Mom\n";

struct Fixture {
    _dir: TempDir,
    controller: TodoController,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("todo.txt");
        fs::write(&path, TODO).unwrap();
        Self {
            controller: TodoController::new(path),
            _dir: dir,
        }
    }

    fn content(&self) -> String {
        fs::read_to_string(self.controller.path()).unwrap()
    }

    fn assert_unchanged(&self) {
        assert_eq!(self.content(), TODO);
    }
}

fn error_kind(err: &anyhow::Error) -> ErrorKind {
    err.downcast_ref::<TodoError>()
        .expect("expected a TodoError")
        .kind()
}

#[test]
fn test_list() {
    let f = Fixture::new();
    let lines = f.controller.list(&ListOptions::default()).unwrap();
    assert_eq!(
        lines,
        vec![
            "[0]: Post signs around the neighborhood +GarageSale",
            "[1]: (B) Schedule Goodwill pickup +GarageSale @phone",
            "[2]: (A) Thank Mom for the meatballs @phone",
            "[3]: @GroceryStore Eskimo pies",
            "[4]: x 2011-03-03 Call Mom",
        ]
    );
}

#[test]
fn test_list_sorted() {
    let f = Fixture::new();
    let options = ListOptions {
        sorted: true,
        filter: None,
    };
    assert_eq!(
        f.controller.list(&options).unwrap(),
        vec![
            "[2]: (A) Thank Mom for the meatballs @phone",
            "[1]: (B) Schedule Goodwill pickup +GarageSale @phone",
            "[0]: Post signs around the neighborhood +GarageSale",
            "[3]: @GroceryStore Eskimo pies",
            "[4]: x 2011-03-03 Call Mom",
        ]
    );
}

#[test]
fn test_list_filtered() {
    let f = Fixture::new();
    let options = ListOptions {
        sorted: false,
        filter: Some("Mom"),
    };
    assert_eq!(
        f.controller.list(&options).unwrap(),
        vec![
            "[2]: (A) Thank Mom for the meatballs @phone",
            "[4]: x 2011-03-03 Call Mom",
        ]
    );
}

#[test]
fn test_list_filtered_then_sorted() {
    let f = Fixture::new();
    let options = ListOptions {
        sorted: true,
        filter: Some("@phone"),
    };
    assert_eq!(
        f.controller.list(&options).unwrap(),
        vec![
            "[2]: (A) Thank Mom for the meatballs @phone",
            "[1]: (B) Schedule Goodwill pickup +GarageSale @phone",
        ]
    );
}

#[test]
fn test_complete() {
    let f = Fixture::new();
    f.controller.complete(0).unwrap();
    let today = Local::now().date_naive().format("%Y-%m-%d");
    assert_eq!(
        f.content(),
        format!(
            "x {} Post signs around the neighborhood +GarageSale\n\
(B) Schedule Goodwill pickup +GarageSale @phone\n\
(A) Thank Mom for the meatballs @phone\n\
@GroceryStore Eskimo pies\n\
x 2011-03-03 Call Mom\n",
            today
        )
    );
}

#[test]
fn test_complete_already_done_is_noop() {
    let f = Fixture::new();
    f.controller.complete(4).unwrap();
    f.assert_unchanged();
}

#[test]
fn test_complete_index_error() {
    let f = Fixture::new();
    let err = f.controller.complete(9).unwrap_err();
    assert_eq!(error_kind(&err), ErrorKind::IndexOutOfRange);
    f.assert_unchanged();
}

#[test]
fn test_add() {
    let f = Fixture::new();
    let index = f
        .controller
        .add("2011-03-01 Review Tim's pull request +TodoTxtTouch @github")
        .unwrap();
    assert_eq!(index, 5);
    assert_eq!(
        f.content(),
        format!("{}2011-03-01 Review Tim's pull request +TodoTxtTouch @github\n", TODO)
    );
}

#[test]
fn test_add_empty_line_fails() {
    let f = Fixture::new();
    let err = f.controller.add("").unwrap_err();
    assert_eq!(error_kind(&err), ErrorKind::Parse);
    f.assert_unchanged();
}

#[test]
fn test_add_to_missing_file_creates_it() {
    let dir = TempDir::new().unwrap();
    let controller = TodoController::new(dir.path().join("sub").join("todo.txt"));
    controller.add("(A) First task").unwrap();
    assert_eq!(
        fs::read_to_string(controller.path()).unwrap(),
        "(A) First task\n"
    );
}

#[test]
fn test_delete() {
    let f = Fixture::new();
    let removed = f.controller.delete(2).unwrap();
    assert_eq!(removed.to_line(), "(A) Thank Mom for the meatballs @phone");
    assert_eq!(
        f.content(),
        "Post signs around the neighborhood +GarageSale\n\
(B) Schedule Goodwill pickup +GarageSale @phone\n\
@GroceryStore Eskimo pies\n\
x 2011-03-03 Call Mom\n"
    );
    let lines = f.controller.list(&ListOptions::default()).unwrap();
    assert_eq!(lines[2], "[2]: @GroceryStore Eskimo pies");
}

#[test]
fn test_delete_index_error() {
    let f = Fixture::new();
    let err = f.controller.delete(8).unwrap_err();
    assert_eq!(error_kind(&err), ErrorKind::IndexOutOfRange);
    f.assert_unchanged();
}

#[test]
fn test_report() {
    let f = Fixture::new();
    assert_eq!(
        f.controller.report().unwrap().to_string(),
        "5 tasks, 1 completed (20.0%)\n\
Task counts by priority:\n\
(A) -> 1\n\
(B) -> 1\n"
    );
}

#[test]
fn test_prioritise() {
    let f = Fixture::new();
    f.controller.prioritise(3, "D").unwrap();
    assert_eq!(
        f.content(),
        "Post signs around the neighborhood +GarageSale\n\
(B) Schedule Goodwill pickup +GarageSale @phone\n\
(A) Thank Mom for the meatballs @phone\n\
(D) @GroceryStore Eskimo pies\n\
x 2011-03-03 Call Mom\n"
    );
}

#[test]
fn test_prioritise_same() {
    let f = Fixture::new();
    f.controller.prioritise(1, "B").unwrap();
    f.assert_unchanged();
}

#[test]
fn test_prioritise_override() {
    let f = Fixture::new();
    f.controller.prioritise(1, "D").unwrap();
    assert_eq!(
        f.content(),
        "Post signs around the neighborhood +GarageSale\n\
(D) Schedule Goodwill pickup +GarageSale @phone\n\
(A) Thank Mom for the meatballs @phone\n\
@GroceryStore Eskimo pies\n\
x 2011-03-03 Call Mom\n"
    );
}

#[test]
fn test_prioritise_uses_first_character() {
    let f = Fixture::new();
    f.controller.prioritise(3, "DD").unwrap();
    assert!(f.content().contains("\n(D) @GroceryStore Eskimo pies\n"));
}

#[test]
fn test_prioritise_index_error() {
    let f = Fixture::new();
    let err = f.controller.prioritise(9, "D").unwrap_err();
    assert_eq!(error_kind(&err), ErrorKind::IndexOutOfRange);
    f.assert_unchanged();
}

#[test]
fn test_prioritise_priority_error() {
    let f = Fixture::new();
    let err = f.controller.prioritise(3, "3").unwrap_err();
    assert_eq!(error_kind(&err), ErrorKind::Validation);
    f.assert_unchanged();
}

#[test]
fn test_deprioritise() {
    let f = Fixture::new();
    f.controller.deprioritise(2).unwrap();
    assert_eq!(
        f.content(),
        "Post signs around the neighborhood +GarageSale\n\
(B) Schedule Goodwill pickup +GarageSale @phone\n\
Thank Mom for the meatballs @phone\n\
@GroceryStore Eskimo pies\n\
x 2011-03-03 Call Mom\n"
    );
    f.controller.deprioritise(2).unwrap();
    assert!(f.content().contains("\nThank Mom for the meatballs @phone\n"));
}

#[test]
fn test_deprioritise_index_error() {
    let f = Fixture::new();
    let err = f.controller.deprioritise(9).unwrap_err();
    assert_eq!(error_kind(&err), ErrorKind::IndexOutOfRange);
    f.assert_unchanged();
}

#[test]
fn test_blank_lines_are_dropped_on_rewrite() {
    let f = Fixture::new();
    fs::write(f.controller.path(), "first\n\nsecond\n").unwrap();
    f.controller.prioritise(1, "A").unwrap();
    assert_eq!(f.content(), "first\n(A) second\n");
}

#[test]
fn test_stray_carriage_return_splits_the_line() {
    let f = Fixture::new();
    fs::write(f.controller.path(), "first\nsec\rond\nthird\n").unwrap();
    assert_eq!(
        f.controller.list(&ListOptions::default()).unwrap(),
        vec!["[0]: first", "[1]: sec", "[2]: ond", "[3]: third"]
    );
    f.controller.prioritise(1, "A").unwrap();
    assert_eq!(f.content(), "first\n(A) sec\nond\nthird\n");
}

#[test]
fn test_add_still_rejects_line_breaks() {
    let f = Fixture::new();
    let err = f.controller.add("two\rlines").unwrap_err();
    assert_eq!(error_kind(&err), ErrorKind::Parse);
    f.assert_unchanged();
}

#[test]
fn test_save_keeps_unrelated_neighbour_files() {
    let f = Fixture::new();
    let dir = f.controller.path().parent().unwrap().to_path_buf();
    fs::write(dir.join("todo.tmp"), "USER DATA\n").unwrap();

    f.controller.list(&ListOptions::default()).unwrap();
    assert!(!dir.join("todo.txt.lock").exists());

    f.controller.add("b").unwrap();
    assert_eq!(fs::read_to_string(dir.join("todo.tmp")).unwrap(), "USER DATA\n");
    assert!(!dir.join("todo.txt.tmp").exists());
}

use std::io::Cursor;
use std::path::Path;

use chrono::Local;
use tempfile::tempdir;

use library_catalog::{run_app, App, BookStatus, Catalog, Config, Console, Interrupt};

fn config_in(dir: &Path) -> Config {
    Config {
        library_file: dir.join("library.json"),
        export_file: dir.join("library.csv"),
        ..Config::default()
    }
}

/// Feed `script` to a fresh session and return the app plus everything printed.
fn run_script(app: &mut App, script: &str) -> String {
    let mut console = Console::new(Cursor::new(script.as_bytes().to_vec()), Vec::new(), false);
    run_app(app, &mut console).unwrap();
    String::from_utf8(console.into_output()).unwrap()
}

#[test]
fn borrow_return_save_load_session() {
    let dir = tempdir().unwrap();
    let config = config_in(dir.path());
    let mut app = App::new(Catalog::new(), &config);

    let output = run_script(
        &mut app,
        "2\n1\nDune\nHerbert\n1965\n5\n1\n5\n1\n6\n1\n7\n0\n",
    );

    assert!(output.contains("===== LIBRARY MENU ====="));
    assert!(output.contains("No books in library yet."));
    assert!(output.contains("✓ 'Dune' added to library."));
    assert!(output.contains("1. Dune by Herbert (1965) - Available"));
    assert!(output.contains("✓ You borrowed 'Dune'."));
    assert!(output.contains("! 'Dune' is already borrowed."));
    assert!(output.contains("✓ You returned 'Dune'."));
    assert!(output.contains("✓ Library saved."));
    assert!(output.trim_end().ends_with("Goodbye!"));

    let before = app.catalog().clone();
    let mut reloaded = App::new(Catalog::new(), &config);
    assert!(!reloaded.load().is_error());
    assert_eq!(reloaded.catalog(), &before);
    assert_eq!(
        reloaded.catalog().get(1).unwrap().status(),
        BookStatus::Available
    );
}

#[test]
fn borrowed_state_survives_a_restart() {
    let dir = tempdir().unwrap();
    let config = config_in(dir.path());
    let mut app = App::new(Catalog::new(), &config);
    run_script(&mut app, "1\nDune\nHerbert\n1965\n1\nEmma\nAusten\n1815\n5\n2\n7\n0\n");

    let mut next = App::new(Catalog::new(), &config);
    let output = run_script(&mut next, "8\n4\n0\n");

    assert!(output.contains("✓ Library loaded."));
    assert!(output.contains("2. Emma by Austen (1815) - Borrowed"));
    assert!(!output.contains("1. Dune by Herbert (1965)"));
    let emma = next.catalog().get(2).unwrap();
    assert_eq!(emma.borrowed_date(), Some(Local::now().date_naive()));
}

#[test]
fn bad_input_is_reported_and_the_loop_continues() {
    let dir = tempdir().unwrap();
    let mut app = App::new(Catalog::new(), &config_in(dir.path()));

    let output = run_script(&mut app, "42\n5\nfirst\n6\n3\n8\n0\n");

    assert!(output.contains("! Invalid choice, try again."));
    assert!(output.contains("! Please enter a valid number."));
    assert!(output.contains("! Invalid book number."));
    assert!(output.contains("! No saved library found."));
    assert!(output.trim_end().ends_with("Goodbye!"));
}

#[test]
fn end_of_input_exits_cleanly() {
    let dir = tempdir().unwrap();
    let mut app = App::new(Catalog::new(), &config_in(dir.path()));

    let output = run_script(&mut app, "1\nDune\nHerbert\n");

    assert!(output.trim_end().ends_with("Exiting program."));
    assert!(app.catalog().is_empty());
}

#[test]
fn export_writes_a_readable_report() {
    let dir = tempdir().unwrap();
    let config = config_in(dir.path());
    let mut app = App::new(Catalog::new(), &config);

    let output = run_script(&mut app, "1\nWar, Peace\nTolstoy\n1869\n5\n1\n9\n0\n");
    assert!(output.contains("✓ Exported to CSV."));

    let mut reader = csv::Reader::from_path(&config.export_file).unwrap();
    let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(rows.len(), 1);
    assert_eq!(&rows[0][0], "War, Peace");
    assert_eq!(&rows[0][3], "Borrowed");
    assert_eq!(
        &rows[0][4],
        Local::now().date_naive().format("%Y-%m-%d").to_string().as_str()
    );
}

#[test]
fn windows_line_endings_are_accepted() {
    let dir = tempdir().unwrap();
    let mut app = App::new(Catalog::new(), &config_in(dir.path()));

    run_script(&mut app, "1\r\nDune\r\nHerbert\r\n1965\r\n0\r\n");

    let book = app.catalog().get(1).unwrap();
    assert_eq!(book.title, "Dune");
    assert_eq!(book.year.to_string(), "1965");
}

#[test]
fn session_sharing_an_interrupt_leaves_with_farewell() {
    let dir = tempdir().unwrap();
    let mut app = App::new(Catalog::new(), &config_in(dir.path()));
    let interrupt = Interrupt::default();

    let input = Cursor::new(b"1\nDune\nHerbert\n1965\n7\n".to_vec());
    let mut console = Console::new(input, Vec::new(), false).with_interrupt(interrupt.clone());
    run_app(&mut app, &mut console).unwrap();
    let output = String::from_utf8(console.into_output()).unwrap();

    assert!(output.contains("✓ Library saved."));
    assert!(output.ends_with("Choose an option: \nExiting program.\n"));
    assert!(interrupt.is_idle());
}

#[test]
fn record_breaking_the_borrow_invariant_is_rejected_on_load() {
    let dir = tempdir().unwrap();
    let config = config_in(dir.path());
    std::fs::write(
        &config.library_file,
        r#"[{"title":"A","author":"B","year":"1","status":"Available","borrowed_date":"2024-01-01"}]"#,
    )
    .unwrap();

    let mut app = App::new(Catalog::new(), &config);
    run_script(&mut app, "1\nDune\nHerbert\n1965\n0\n");
    let before = app.catalog().clone();

    let message = app.load();
    assert!(message.is_error());
    assert!(message.text.starts_with("Error loading library: "));
    assert!(message.text.contains("has a borrowed_date"));
    assert_eq!(app.catalog(), &before);
}

#[test]
fn huge_book_number_is_out_of_range() {
    let dir = tempdir().unwrap();
    let mut app = App::new(Catalog::new(), &config_in(dir.path()));

    let output = run_script(
        &mut app,
        "1\nDune\nHerbert\n1965\n5\n99999999999999999999\n0\n",
    );

    assert!(output.contains("! Invalid book number."));
    assert!(!output.contains("! Please enter a valid number."));
}

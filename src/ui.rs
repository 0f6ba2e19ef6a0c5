//! Line-oriented console front-end for the catalog. `app` owns the catalog
//! and turns every operation into a status message. `forms` collects and
//! parses typed input, `helpers` holds the shared rendering bits,
//! `interrupt` makes Ctrl-C leave cleanly, and `terminal` runs the
//! read-dispatch-print loop over any reader/writer pair.

mod app;
mod forms;
mod helpers;
mod interrupt;
mod terminal;

pub use app::{App, MenuChoice, StatusKind, StatusMessage};
pub use forms::{parse_position, BookForm};
pub use interrupt::Interrupt;
pub use terminal::{run_app, Console};

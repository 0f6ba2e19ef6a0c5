use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use crate::models::BookStatus;

use super::app::{App, MenuChoice, StatusMessage};
use super::forms::{parse_position, BookForm};
use super::helpers::MENU;
use super::interrupt::{write_farewell, Interrupt};

/// Line-based console over any reader/writer pair. `stdin`/`stdout` in the
/// binary, in-memory buffers in tests.
#[derive(Debug)]
pub struct Console<R, W> {
    input: R,
    output: W,
    styled: bool,
    interrupt: Interrupt,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, styled: bool) -> Self {
        Self {
            input,
            output,
            styled,
            interrupt: Interrupt::default(),
        }
    }

    /// Share the Ctrl-C coordination installed by the binary.
    pub fn with_interrupt(mut self, interrupt: Interrupt) -> Self {
        self.interrupt = interrupt;
        self
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Print `label` and read one line without its line ending. `None` means
    /// input is over (Ctrl-D or a closed pipe); Ctrl-C is handled by
    /// [`Interrupt`].
    pub fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{label}").context("failed to write prompt")?;
        self.output.flush().context("failed to flush prompt")?;

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => Ok(None),
            Ok(_) => {
                let trimmed = line.trim_end_matches(['\n', '\r']).len();
                line.truncate(trimmed);
                Ok(Some(line))
            }
            Err(err) => Err(err).context("failed to read console input"),
        }
    }

    pub fn line(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{text}").context("failed to write to console")
    }

    pub fn status(&mut self, message: &StatusMessage) -> Result<()> {
        let rendered = message.render(self.styled);
        self.line(&rendered)
    }

    fn interrupted(&mut self) -> Result<()> {
        write_farewell(&mut self.output).context("failed to write to console")
    }
}

/// Drive the menu until the user picks `0` or input runs out. Catalog, file
/// and export problems are printed as status lines; only a broken console
/// ends the loop with an error.
pub fn run_app<R: BufRead, W: Write>(app: &mut App, console: &mut Console<R, W>) -> Result<()> {
    let interrupt = console.interrupt.clone();
    loop {
        console.line(MENU)?;
        let Some(choice) = console.prompt("Choose an option: ")? else {
            return console.interrupted();
        };

        let Some(choice) = MenuChoice::parse(&choice) else {
            console.status(&StatusMessage::error("Invalid choice, try again."))?;
            continue;
        };

        let finished = match choice {
            MenuChoice::AddBook => add_book(app, console)?,
            MenuChoice::ListAll => {
                show_listing(app, console, None)?;
                true
            }
            MenuChoice::ListAvailable => {
                show_listing(app, console, Some(BookStatus::Available))?;
                true
            }
            MenuChoice::ListBorrowed => {
                show_listing(app, console, Some(BookStatus::Borrowed))?;
                true
            }
            MenuChoice::Borrow => pick_and_apply(
                app,
                console,
                BookStatus::Available,
                "Enter book number to borrow: ",
                App::borrow,
            )?,
            MenuChoice::Return => pick_and_apply(
                app,
                console,
                BookStatus::Borrowed,
                "Enter book number to return: ",
                App::return_book,
            )?,
            MenuChoice::Save => {
                let message = guarded(&interrupt, || app.save());
                console.status(&message)?;
                true
            }
            MenuChoice::Load => {
                let message = guarded(&interrupt, || app.load());
                console.status(&message)?;
                true
            }
            MenuChoice::Export => {
                let message = guarded(&interrupt, || app.export());
                console.status(&message)?;
                true
            }
            MenuChoice::Exit => {
                console.line("Goodbye!")?;
                return Ok(());
            }
        };

        if !finished {
            return console.interrupted();
        }
    }
}

/// Returns `false` when input ran out part-way through the prompts.
fn add_book<R: BufRead, W: Write>(app: &mut App, console: &mut Console<R, W>) -> Result<bool> {
    let mut answers: [String; 3] = Default::default();
    for (answer, label) in answers.iter_mut().zip(BookForm::PROMPTS) {
        match console.prompt(label)? {
            Some(value) => *answer = value,
            None => return Ok(false),
        }
    }

    let interrupt = console.interrupt.clone();
    let message = guarded(&interrupt, || app.add_book(BookForm::from_answers(answers)));
    console.status(&message)?;
    Ok(true)
}

fn show_listing<R: BufRead, W: Write>(
    app: &App,
    console: &mut Console<R, W>,
    status: Option<BookStatus>,
) -> Result<()> {
    for line in app.listing(status) {
        console.line(&line)?;
    }
    Ok(())
}

/// Show the books eligible for the action, read a number and apply `action`
/// to it. Returns `false` when input ran out at the prompt.
fn pick_and_apply<R, W, F>(
    app: &mut App,
    console: &mut Console<R, W>,
    eligible: BookStatus,
    label: &str,
    action: F,
) -> Result<bool>
where
    R: BufRead,
    W: Write,
    F: FnOnce(&mut App, usize) -> StatusMessage,
{
    show_listing(app, console, Some(eligible))?;
    let Some(raw) = console.prompt(label)? else {
        return Ok(false);
    };

    let message = match parse_position(&raw) {
        Ok(position) => {
            let interrupt = console.interrupt.clone();
            guarded(&interrupt, || action(app, position))
        }
        Err(_) => StatusMessage::error("Please enter a valid number."),
    };
    console.status(&message)?;
    Ok(true)
}

/// Run one operation while holding the interrupt guard. Prompts stay outside
/// so Ctrl-C at a prompt leaves immediately.
fn guarded<T>(interrupt: &Interrupt, operation: impl FnOnce() -> T) -> T {
    let _busy = interrupt.busy();
    operation()
}

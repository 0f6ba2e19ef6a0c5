use std::io::{self, Write};
use std::process;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, TryLockError};

use anyhow::{Context, Result};
use tracing::info;

/// Farewell printed when the session ends without choosing `0`.
pub(crate) const FAREWELL: &str = "Exiting program.";

/// Coordinates Ctrl-C with the menu loop. The loop holds [`Interrupt::busy`]
/// while an operation runs; the signal handler waits for that guard before it
/// prints the farewell and exits, so a save or export is never cut off.
#[derive(Debug, Clone, Default)]
pub struct Interrupt {
    work: Arc<Mutex<()>>,
}

impl Interrupt {
    /// Install the process-wide Ctrl-C handler. Can only be done once.
    pub fn install() -> Result<Self> {
        let interrupt = Self::default();
        let handler = interrupt.clone();
        ctrlc::set_handler(move || {
            let _idle = handler.wait_idle();
            info!("interrupted, leaving");
            // Nothing sensible is left to do if stdout is gone.
            let _ = write_farewell(io::stdout());
            process::exit(0);
        })
        .context("failed to install Ctrl-C handler")?;
        Ok(interrupt)
    }

    /// Held for the duration of one catalog, file or export operation.
    pub fn busy(&self) -> MutexGuard<'_, ()> {
        self.work.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// True when no operation currently holds the guard.
    pub fn is_idle(&self) -> bool {
        !matches!(self.work.try_lock(), Err(TryLockError::WouldBlock))
    }

    /// Block until no operation is running.
    pub(crate) fn wait_idle(&self) -> MutexGuard<'_, ()> {
        self.busy()
    }
}

/// Newline (the cursor usually sits after a prompt), then the farewell.
pub(crate) fn write_farewell<W: Write>(mut out: W) -> io::Result<()> {
    writeln!(out, "\n{FAREWELL}")?;
    out.flush()
}

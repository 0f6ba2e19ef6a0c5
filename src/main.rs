//! Binary entry point: read configuration, set up logging on stderr, hook
//! Ctrl-C, load the saved library and run the menu loop on stdin/stdout until
//! the user leaves.
use std::io::{self, IsTerminal};

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use library_catalog::{run_app, App, Catalog, Config, Console, Interrupt};

fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "library_catalog=warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let interrupt = Interrupt::install()?;

    // stdout stays unlocked between writes so the Ctrl-C handler can print.
    let stdout = io::stdout();
    let styled = !config.plain && stdout.is_terminal();
    let mut console =
        Console::new(io::stdin().lock(), stdout, styled).with_interrupt(interrupt.clone());
    let mut app = App::new(Catalog::new(), &config);

    if !config.no_autoload {
        let message = {
            let _busy = interrupt.busy();
            app.load()
        };
        console.status(&message)?;
    }

    tracing::debug!(
        library_file = %config.library_file.display(),
        export_file = %config.export_file.display(),
        "starting menu"
    );
    run_app(&mut app, &mut console)
}

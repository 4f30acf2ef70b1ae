//! Interactive todo list on the terminal.
//!
//! Reads one command per line from stdin; `help` lists them.

use std::io::{self, BufRead, Write};
use todo::cli::{self, Command};
use todo::TodoStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo=info,composable_todo_runtime=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let mut store = TodoStore::new();
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    writeln!(stdout, "=== Todo ===  (type `help` for commands)\n")?;
    writeln!(stdout, "{}", cli::render(&store.snapshot()))?;

    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        match Command::parse(&line) {
            Ok(Command::Send(action)) => {
                tracing::info!(?action, "Dispatching");
                store.dispatch(action);
                writeln!(stdout, "{}", cli::render(&store.snapshot()))?;
            },
            Ok(Command::List) => writeln!(stdout, "{}", cli::render(&store.snapshot()))?,
            Ok(Command::Help) => writeln!(stdout, "{}", cli::HELP)?,
            Ok(Command::Quit) => break,
            Ok(Command::Empty) => {},
            Err(error) => writeln!(stdout, "error: {error}")?,
        }
    }

    Ok(())
}

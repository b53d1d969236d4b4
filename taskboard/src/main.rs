//! Interactive taskboard for the terminal.
//!
//! Reads one command per line from stdin, dispatches it through the store
//! and redraws the board on stdout. Logs go to stderr.

use std::io::{self, BufRead, Write};
use std::sync::Arc;
use taskboard::dispatch::HELP;
use taskboard::{
    parse_line, Command, Config, FileStorage, MonotonicIdGenerator, PersistenceGateway,
    TaskboardEnvironment, TaskboardReducer, TaskboardShell, TextRenderer,
};
use taskboard_core::environment::SystemClock;
use taskboard_runtime::Store;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_new(&config.log_level)?)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    taskboard_runtime::metrics::register_metrics();

    tracing::info!(path = %config.storage_path.display(), "Starting taskboard");

    let storage = FileStorage::open(&config.storage_path)?;
    let gateway = PersistenceGateway::with_keys(storage, config.keys);
    let state = gateway.load()?;

    // Time-based ids must not collide with ones minted in earlier sessions
    let ids = MonotonicIdGenerator::new(Arc::new(SystemClock));
    for id in state.ids() {
        ids.observe(id);
    }

    let shell = TaskboardShell::new(gateway, TextRenderer::new(io::stdout()));
    let mut store = Store::new(
        state,
        TaskboardReducer::new(),
        TaskboardEnvironment::new(Arc::new(ids)),
        shell,
    );
    store.render()?;

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next().transpose()? else {
            break;
        };

        let command = match store.state(|state| parse_line(&line, state)) {
            Ok(command) => command,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        match command {
            Command::Empty => {}
            Command::Help => println!("{HELP}"),
            Command::Quit => break,
            Command::Intent(intent) => {
                if let Err(e) = store.send(intent.into()) {
                    tracing::error!(error = %e, "Action failed");
                    println!("error: {e}");
                }
            }
        }
    }

    tracing::info!("Exiting taskboard");
    Ok(())
}

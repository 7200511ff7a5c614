// expense - keeps track of what you spend
//
// This is the main entry point. Parses CLI args, opens the store, dispatches.

use expense_tracker_lib::{
    cli::{self, Command, Confirm, LineConfirm, TerminalConfirm},
    Config, Database, Result,
};
use std::env;
use std::io::{self, IsTerminal, Write};
use std::process;
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Logs go to stderr; stdout is only for the report
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_target(false)
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();

    if let Err(e) = run(&args).await {
        eprintln!("{}", e.user_message());
        process::exit(e.exit_code());
    }
}

async fn run(args: &[String]) -> Result<()> {
    let command = Command::parse(args)?;
    let mut out = io::stdout().lock();

    if !command.needs_database() {
        return match command {
            Command::Version => cli::write_version(&mut out),
            _ => cli::write_help(&mut out),
        };
    }

    let config = Config::from_env()?;
    debug!(database = %config.database, ?command, "dispatching");

    let mut db = Database::connect(&config).await?;
    let mut confirm = confirmer();

    cli::run(command, &mut db, confirm.as_mut(), &mut out).await?;
    out.flush()?;

    db.close().await
}

// Raw keypress when we have a terminal, a plain line otherwise
fn confirmer() -> Box<dyn Confirm> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        Box::new(TerminalConfirm)
    } else {
        Box::new(LineConfirm::new(stdin.lock()))
    }
}

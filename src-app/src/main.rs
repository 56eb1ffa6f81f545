use std::io::{self, BufReader, IsTerminal};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use mindsync_core::{Config, DEFAULT_HASH_ITERATIONS};
use mindsync_lib::{AppState, Shell};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Directory holding the durable user database
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// PBKDF2 iterations for newly registered passwords
    #[arg(long, default_value_t = DEFAULT_HASH_ITERATIONS)]
    iterations: u32,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    mindsync_core::init_logging();

    let data_dir = args.data_dir.unwrap_or_else(Config::data_dir);
    let config = Config::new(data_dir).with_hash_iterations(args.iterations);

    let state = AppState::new(config.clone()).with_context(|| {
        format!(
            "failed to open database at {}",
            config.database_path.display()
        )
    })?;

    tracing::info!("MindSync started");

    // Not locked for the whole run: hidden password prompts read stdin too
    let interactive = io::stdin().is_terminal();
    let mut shell = Shell::new(state, BufReader::new(io::stdin()), io::stdout())
        .with_hidden_passwords(interactive);
    shell.run()?;

    Ok(())
}

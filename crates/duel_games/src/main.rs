//! Duel - command-line front end.
//!
//! Encodes each subcommand as an action payload and pushes it through the
//! same dispatcher a hosting runtime would use.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use duel_games::{
    Action, Advance, Close, Dispatched, Dispatcher, DuelConfig, GameKey, GameMachine, GameRecord,
    MemoryStore, Name, Position, RecordStore, Restart, SignerSet, SqliteStore, Start,
};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = DuelConfig::load(cli.config.as_deref())?;
    if let Some(database) = &cli.database {
        config = config.with_database(database.clone());
    }

    init_tracing(config.log_filter());

    if cli.memory {
        info!("Using in-memory store");
        run(&cli, &config, MemoryStore::new())
    } else {
        let store = SqliteStore::open(config.database())?;
        info!(path = %store.path().display(), "Using SQLite store");
        run(&cli, &config, store)
    }
}

/// Installs the tracing subscriber, preferring `RUST_LOG` over the config.
fn init_tracing(fallback: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Runs one subcommand against `store`.
#[instrument(skip_all, fields(contract = %config.contract()))]
fn run<S: RecordStore>(cli: &Cli, config: &DuelConfig, store: S) -> Result<()> {
    let mut dispatcher = Dispatcher::new(*config.contract(), GameMachine::new(store));

    let (action, actor) = match cli.command {
        Command::Start { host, challenger } => (Action::Start(Start { challenger, host }), host),
        Command::Restart {
            host,
            challenger,
            by,
        } => (
            Action::Restart(Restart {
                challenger,
                host,
                by,
            }),
            by,
        ),
        Command::Close { host, challenger } => (Action::Close(Close { challenger, host }), host),
        Command::Advance {
            host,
            challenger,
            by,
            row,
            column,
        } => (
            Action::Advance(Advance {
                challenger,
                host,
                by,
                row,
                column,
            }),
            by,
        ),
        Command::Show {
            host,
            challenger,
            json,
        } => {
            let record = dispatcher.machine().game(GameKey::new(host, challenger))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else {
                print_record(&record);
            }
            return Ok(());
        }
        Command::List { host } => {
            for record in dispatcher.machine().store().scope(host)? {
                println!(
                    "{}\tturn={}\twinner={}\tmoves={}",
                    record.key(),
                    record.turn(),
                    record.winner(),
                    record.board().marked()
                );
            }
            return Ok(());
        }
    };

    let signers = if cli.signers.is_empty() {
        SignerSet::single(actor)
    } else {
        SignerSet::new(cli.signers.iter().copied())
    };

    let payload = action.encode()?;
    let contract = dispatcher.contract();
    let verb = action.verb();
    match dispatcher.apply(contract, &signers, verb.tag(), &payload)? {
        Dispatched::Handled(verb) => info!(%verb, %action, "Action committed"),
        Dispatched::Ignored => info!(%action, "Action ignored"),
    }

    if let Some(key) = game_key(&action) {
        print_record(&dispatcher.machine().game(key)?);
    }
    Ok(())
}

/// Address of the game an action leaves behind, if any.
fn game_key(action: &Action) -> Option<GameKey> {
    match action {
        Action::Start(a) => Some(GameKey::new(a.host, a.challenger)),
        Action::Restart(a) => Some(GameKey::new(a.host, a.challenger)),
        Action::Advance(a) => Some(GameKey::new(a.host, a.challenger)),
        Action::Close(_) => None,
    }
}

fn print_record(record: &GameRecord) {
    println!("{}", record.board().display());
    println!();
    println!("host (X): {}", record.host());
    println!("challenger (O): {}", record.challenger());
    if record.is_finished() {
        println!("winner: {}", record.winner());
    } else {
        let open: Vec<String> = Position::open(record.board())
            .iter()
            .map(|p| format!("({}, {})", p.row(), p.column()))
            .collect();
        println!("to move: {}", who(record, *record.turn()));
        println!("open cells: {}", open.join(" "));
    }
}

fn who(record: &GameRecord, account: Name) -> String {
    match record.side_of(account) {
        Some(side) => format!("{} ({})", account, side),
        None => account.to_string(),
    }
}

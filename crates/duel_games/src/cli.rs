//! Command-line interface for duel.

use clap::{Parser, Subcommand};
use duel_games::Name;
use std::path::PathBuf;

/// Duel - authenticated tic-tac-toe over a record store
#[derive(Parser, Debug)]
#[command(name = "duel")]
#[command(about = "Play tic-tac-toe games stored per (host, challenger)", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file (defaults to ./duel.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// SQLite database file, overriding the config
    #[arg(long, global = true)]
    pub database: Option<PathBuf>,

    /// Use a throwaway in-memory store instead of SQLite
    #[arg(long, global = true)]
    pub memory: bool,

    /// Account that signed the action; repeatable. Defaults to the acting
    /// participant.
    #[arg(long = "signer", global = true)]
    pub signers: Vec<Name>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Open a game; the host moves first
    Start {
        /// Opening account
        #[arg(long)]
        host: Name,
        /// Invited account
        #[arg(long)]
        challenger: Name,
    },

    /// Reset a game to an empty board
    Restart {
        /// Host of the game
        #[arg(long)]
        host: Name,
        /// Challenger of the game
        #[arg(long)]
        challenger: Name,
        /// Participant requesting the reset
        #[arg(long)]
        by: Name,
    },

    /// Delete a game (host only)
    Close {
        /// Host of the game
        #[arg(long)]
        host: Name,
        /// Challenger of the game
        #[arg(long)]
        challenger: Name,
    },

    /// Mark one cell
    Advance {
        /// Host of the game
        #[arg(long)]
        host: Name,
        /// Challenger of the game
        #[arg(long)]
        challenger: Name,
        /// Participant making the move
        #[arg(long)]
        by: Name,
        /// Row (0-2)
        #[arg(long)]
        row: u32,
        /// Column (0-2)
        #[arg(long)]
        column: u32,
    },

    /// Print one game
    Show {
        /// Host of the game
        #[arg(long)]
        host: Name,
        /// Challenger of the game
        #[arg(long)]
        challenger: Name,
        /// Print the record as JSON
        #[arg(long)]
        json: bool,
    },

    /// List every game hosted by an account
    List {
        /// Host whose games to list
        #[arg(long)]
        host: Name,
    },
}

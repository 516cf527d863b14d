//! Duel games - authenticated two-player tic-tac-toe over a record store.
//!
//! Each game between a host and a challenger is one record, stored under the
//! host's scope and keyed by the challenger. Records change only through
//! four operations, each authorized and all-or-nothing.
//!
//! # Architecture
//!
//! - **Store**: [`RecordStore`] contract with in-memory and SQLite backends
//! - **Machine**: [`GameMachine`] start / restart / close / advance
//! - **Dispatch**: [`Dispatcher`] decodes `(identity, verb, payload)` actions
//! - **Board rules**: re-exported from `duel_board`
//!
//! # Example
//!
//! ```
//! use duel_games::{Action, Dispatched, Dispatcher, GameKey, GameMachine, MemoryStore, Name, Start, Verb};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let alice: Name = "alice".parse()?;
//! let bob: Name = "bob".parse()?;
//!
//! let mut dispatcher = Dispatcher::new("tictactoe".parse()?, GameMachine::new(MemoryStore::new()));
//! let payload = Action::Start(Start { challenger: bob, host: alice }).encode()?;
//! let outcome = dispatcher.invoke(alice, Verb::Start.tag(), &payload)?;
//!
//! assert_eq!(outcome, Dispatched::Handled(Verb::Start));
//! assert_eq!(*dispatcher.machine().game(GameKey::new(alice, bob))?.turn(), alice);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod auth;
mod config;
pub mod contracts;
mod dispatch;
mod error;
pub mod invariants;
mod machine;
mod name;
mod record;
mod store;

// Crate-level exports - Identifiers
pub use name::{MAX_NAME_LEN, Name, NameError};

// Crate-level exports - Data model
pub use record::{GameKey, GameRecord, Winner};

// Crate-level exports - Storage
pub use store::{MemoryStore, RecordStore, SqliteStore, StoreError, StoreErrorKind};

// Crate-level exports - Authorization
pub use auth::{AuthorizeWith, Authorizer, SignerSet, Unauthorized};

// Crate-level exports - Engine
pub use error::EngineError;
pub use machine::GameMachine;

// Crate-level exports - Actions and dispatch
pub use action::{Action, Advance, Close, PayloadError, Restart, Start, Verb};
pub use dispatch::{DispatchError, Dispatched, Dispatcher};

// Crate-level exports - Configuration
pub use config::{ConfigError, DATABASE_ENV, DuelConfig};

// Crate-level exports - Board rules
pub use duel_board::{Board, Cell, Outcome, Position, Side, evaluate, is_legal_move};

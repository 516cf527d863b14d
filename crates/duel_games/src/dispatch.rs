//! Routes inbound actions to the state machine.

use crate::action::{Action, PayloadError, Verb};
use crate::auth::{Authorizer, SignerSet};
use crate::machine::GameMachine;
use crate::store::RecordStore;
use crate::{EngineError, Name};
use derive_more::{Display, Error};
use tracing::{debug, info, instrument};

/// What the dispatcher did with an inbound action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatched {
    /// The action was decoded and the operation committed.
    Handled(Verb),
    /// The action was addressed elsewhere or carried an unknown verb.
    Ignored,
}

/// Why a dispatched action failed.
#[derive(Debug, Clone, Display, Error)]
pub enum DispatchError {
    /// The payload did not match the verb's schema.
    #[display("{_0}")]
    Payload(#[error(not(source))] PayloadError),
    /// The state machine rejected the action.
    #[display("{_0}")]
    Engine(#[error(not(source))] EngineError),
}

impl From<PayloadError> for DispatchError {
    fn from(err: PayloadError) -> Self {
        Self::Payload(err)
    }
}

impl From<EngineError> for DispatchError {
    fn from(err: EngineError) -> Self {
        Self::Engine(err)
    }
}

/// Single entry point for actions addressed to one contract account.
///
/// Actions for other accounts and verbs outside [`Verb`] are ignored without
/// error, so the dispatcher can share an entry point with unrelated handlers.
#[derive(Debug, Clone)]
pub struct Dispatcher<S> {
    contract: Name,
    machine: GameMachine<S>,
}

impl<S: RecordStore> Dispatcher<S> {
    /// Creates a dispatcher answering for `contract`.
    pub fn new(contract: Name, machine: GameMachine<S>) -> Self {
        info!(%contract, "Dispatcher created");
        Self { contract, machine }
    }

    /// The account this dispatcher answers for.
    pub fn contract(&self) -> Name {
        self.contract
    }

    /// The wrapped state machine.
    pub fn machine(&self) -> &GameMachine<S> {
        &self.machine
    }

    /// Applies an action addressed to `code`.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Payload`] if the payload does not decode, or
    /// [`DispatchError::Engine`] if the operation is rejected.
    #[instrument(skip(self, auth, payload), fields(contract = %self.contract, len = payload.len()))]
    pub fn apply(
        &mut self,
        code: Name,
        auth: &impl Authorizer,
        verb_tag: Name,
        payload: &[u8],
    ) -> Result<Dispatched, DispatchError> {
        if code != self.contract {
            debug!(%code, "Action addressed elsewhere");
            return Ok(Dispatched::Ignored);
        }
        let Some(verb) = Verb::from_tag(verb_tag) else {
            debug!(%verb_tag, "Unknown verb ignored");
            return Ok(Dispatched::Ignored);
        };

        let action = Action::decode(verb, payload)?;
        debug!(%action, "Dispatching");

        match action {
            Action::Start(a) => {
                self.machine.start(auth, &a)?;
            }
            Action::Restart(a) => {
                self.machine.restart(auth, &a)?;
            }
            Action::Close(a) => {
                self.machine.close(auth, &a)?;
            }
            Action::Advance(a) => {
                self.machine.advance(auth, &a)?;
            }
        }
        Ok(Dispatched::Handled(verb))
    }

    /// Applies an action signed by exactly one account and addressed to this
    /// dispatcher's contract.
    ///
    /// # Errors
    ///
    /// As [`Dispatcher::apply`].
    pub fn invoke(
        &mut self,
        invoker: Name,
        verb_tag: Name,
        payload: &[u8],
    ) -> Result<Dispatched, DispatchError> {
        let contract = self.contract;
        self.apply(contract, &SignerSet::single(invoker), verb_tag, payload)
    }
}

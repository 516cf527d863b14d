//! Authorization of the accounts an action speaks for.
//!
//! The engine never verifies signatures itself. The runtime that delivers an
//! action hands over an [`Authorizer`] describing which accounts it has
//! already proven; operations ask it before touching any state.

use crate::Name;
use derive_more::{Display, Error};
use std::collections::BTreeSet;
use tracing::{debug, instrument};

/// The invocation does not carry the named account's authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("Missing authorization of {account}")]
pub struct Unauthorized {
    /// Account whose authorization was required.
    pub account: Name,
}

/// Answers whether an account has authorized the current invocation.
pub trait Authorizer {
    /// Succeeds iff `account` authorized this invocation.
    ///
    /// # Errors
    ///
    /// Returns [`Unauthorized`] naming the missing account.
    fn require(&self, account: Name) -> Result<(), Unauthorized>;
}

/// A pre-verified set of signing accounts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignerSet {
    signers: BTreeSet<Name>,
}

impl SignerSet {
    /// Creates a set from already verified accounts.
    pub fn new(signers: impl IntoIterator<Item = Name>) -> Self {
        Self {
            signers: signers.into_iter().collect(),
        }
    }

    /// A set holding exactly one signer.
    pub fn single(signer: Name) -> Self {
        Self::new([signer])
    }

    /// Returns true if `account` signed.
    pub fn contains(&self, account: Name) -> bool {
        self.signers.contains(&account)
    }
}

impl Authorizer for SignerSet {
    #[instrument(skip(self))]
    fn require(&self, account: Name) -> Result<(), Unauthorized> {
        if self.contains(account) {
            Ok(())
        } else {
            debug!(%account, "Authorization missing");
            Err(Unauthorized { account })
        }
    }
}

/// Adapts a predicate into an [`Authorizer`].
#[derive(Debug, Clone, Copy)]
pub struct AuthorizeWith<F>(pub F);

impl<F> Authorizer for AuthorizeWith<F>
where
    F: Fn(Name) -> bool,
{
    fn require(&self, account: Name) -> Result<(), Unauthorized> {
        if (self.0)(account) {
            Ok(())
        } else {
            Err(Unauthorized { account })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signer_set() {
        let alice: Name = "alice".parse().unwrap();
        let bob: Name = "bob".parse().unwrap();
        let signers = SignerSet::single(alice);
        assert!(signers.require(alice).is_ok());
        assert_eq!(signers.require(bob), Err(Unauthorized { account: bob }));
    }

    #[test]
    fn test_predicate_authorizer() {
        let alice: Name = "alice".parse().unwrap();
        let nobody = AuthorizeWith(|_| false);
        assert!(nobody.require(alice).is_err());
        let everyone = AuthorizeWith(|_| true);
        assert!(everyone.require(alice).is_ok());
    }
}

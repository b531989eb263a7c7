//! Movement records and account statements.

use crate::clock::Timestamp;
use crate::money::Money;
use std::fmt;

/// Direction of a movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MovementKind {
    /// Funds credited to the account.
    Deposit,

    /// Funds debited from the account.
    Withdrawal,
}

impl fmt::Display for MovementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MovementKind::Deposit => f.write_str("Deposit"),
            MovementKind::Withdrawal => f.write_str("Withdrawal"),
        }
    }
}

/// One successful deposit or withdrawal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Movement {
    pub kind: MovementKind,
    pub amount: Money,
    pub at: Timestamp,
}

impl Movement {
    pub fn deposit(amount: Money, at: Timestamp) -> Self {
        Movement {
            kind: MovementKind::Deposit,
            amount,
            at,
        }
    }

    pub fn withdrawal(amount: Money, at: Timestamp) -> Self {
        Movement {
            kind: MovementKind::Withdrawal,
            amount,
            at,
        }
    }
}

/// Read-only view of an account's history and balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Statement<'a> {
    /// The account has never had a successful movement.
    NoMovements { balance: Money },

    /// Movements in the order they happened, oldest first.
    Movements {
        movements: &'a [Movement],
        balance: Money,
    },
}

impl<'a> Statement<'a> {
    pub(crate) fn new(movements: &'a [Movement], balance: Money) -> Self {
        if movements.is_empty() {
            Statement::NoMovements { balance }
        } else {
            Statement::Movements { movements, balance }
        }
    }

    pub fn balance(&self) -> Money {
        match self {
            Statement::NoMovements { balance } | Statement::Movements { balance, .. } => *balance,
        }
    }

    /// Movements in order; empty for [`Statement::NoMovements`].
    pub fn movements(&self) -> &'a [Movement] {
        match self {
            Statement::NoMovements { .. } => &[],
            Statement::Movements { movements, .. } => movements,
        }
    }

    /// Number of movements of the given kind.
    pub fn count(&self, kind: MovementKind) -> usize {
        self.movements().iter().filter(|m| m.kind == kind).count()
    }
}

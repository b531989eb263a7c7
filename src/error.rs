//! Error types for the bank ledger and the menu binary.

use crate::money::Money;
use thiserror::Error;

/// Result type alias for ledger operations
pub type Result<T> = std::result::Result<T, BankError>;

/// Business-rule outcomes returned by account and registry operations.
///
/// Every variant is recoverable: the operation made no change and the caller
/// may try again with different input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BankError {
    /// Amount was zero or negative
    #[error("invalid amount {0}: the value must be positive")]
    InvalidAmount(Money),

    /// Deposit would push the balance past the largest representable amount
    #[error("deposit of {requested} would overflow the balance of {balance}")]
    AmountOutOfRange { requested: Money, balance: Money },

    /// Withdrawal larger than the current balance
    #[error("insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds { requested: Money, available: Money },

    /// Withdrawal larger than the per-withdrawal cap
    #[error("withdrawal of {requested} exceeds the per-withdrawal limit of {limit}")]
    ExceedsPerWithdrawalLimit { requested: Money, limit: Money },

    /// Account already used all of its withdrawals
    #[error("withdrawal limit of {limit} reached")]
    WithdrawalLimitReached { limit: u32 },

    /// A customer with this tax ID is already registered
    #[error("a customer with tax ID {0} already exists")]
    DuplicateTaxId(String),

    /// Birth date not in dd-mm-yyyy form or not a calendar date
    #[error("invalid birth date {0:?}: expected dd-mm-yyyy")]
    InvalidBirthDate(String),

    /// No customer with this tax ID
    #[error("customer with tax ID {0} not found")]
    CustomerNotFound(String),

    /// No open account with this number
    #[error("account {0} not found")]
    AccountNotFound(u32),
}

/// Errors that stop the menu binary.
#[derive(Error, Debug)]
pub enum AppError {
    /// Failed to read input, write output or open the config file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid JSON for `BankConfig`
    #[error("config parsing error: {0}")]
    Config(#[from] serde_json::Error),

    /// Config parsed but holds an unusable value
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

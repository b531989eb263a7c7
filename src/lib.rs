//! # Retail Bank
//!
//! An in-memory banking ledger for a single session: customers, accounts,
//! deposits, withdrawals and statements.
//!
//! ## Design Principles
//!
//! - **Exact arithmetic**: Amounts use `rust_decimal` at full precision and
//!   display with two decimal places
//! - **Business rules as results**: Every rejected operation returns a
//!   [`BankError`] and changes nothing
//! - **Injected limits and time**: Withdrawal caps come from [`BankConfig`],
//!   timestamps from a [`Clock`]
//! - **Single-threaded**: Nothing is synchronized; the types are not `Send`
//!
//! ## Example
//!
//! ```
//! use retail_bank::{Bank, BankError, Money};
//!
//! let mut bank = Bank::new();
//! bank.register_customer("Ana Souza", "111", "07-09-1990", "Rua A, 1").unwrap();
//! let number = bank.open_account("111").unwrap().number();
//!
//! let account = bank.find_account_mut(number).unwrap();
//! account.deposit(Money::from(100)).unwrap();
//! assert!(matches!(
//!     account.withdraw(Money::from(600)),
//!     Err(BankError::InsufficientFunds { .. })
//! ));
//! ```

pub mod account;
pub mod bank;
pub mod clock;
pub mod config;
pub mod customer;
pub mod error;
pub mod menu;
pub mod money;
pub mod movement;

pub use account::{Account, BRANCH_CODE};
pub use bank::{AccountListing, AccountSummary, Bank, ClosedAccount};
pub use clock::{Clock, ManualClock, SystemClock, Timestamp};
pub use config::BankConfig;
pub use customer::Customer;
pub use error::{AppError, BankError, Result};
pub use menu::Menu;
pub use money::Money;
pub use movement::{Movement, MovementKind, Statement};

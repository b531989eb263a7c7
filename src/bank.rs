//! In-memory bank registry.
//!
//! Owns every customer and account of a session, enforces tax ID uniqueness
//! and hands out account numbers.

use crate::account::{Account, BRANCH_CODE};
use crate::clock::{Clock, SystemClock, Timestamp};
use crate::config::BankConfig;
use crate::customer::{is_valid_birth_date, Customer};
use crate::error::{BankError, Result};
use log::{debug, warn};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::rc::Rc;

/// The bank registry.
///
/// Customers are keyed by tax ID. Accounts are kept in creation order, which
/// is also ascending account-number order.
///
/// # Account Numbers
///
/// Numbers start at 1 and increase by one per opened account. A closed
/// account's number is never handed out again.
///
/// # Threading
///
/// The registry is not synchronized. It shares customers and the clock via
/// `Rc`, so it cannot cross threads; wrap it yourself if you need that.
#[derive(Debug)]
pub struct Bank {
    /// Registered customers indexed by tax ID.
    customers: HashMap<String, Rc<Customer>>,

    /// Open accounts in creation order.
    accounts: Vec<Account>,

    /// Number the next opened account receives.
    next_number: u32,

    config: BankConfig,
    clock: Rc<dyn Clock>,
}

/// One line of [`Bank::list_accounts`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountSummary<'a> {
    pub branch_code: &'static str,
    pub number: u32,
    pub owner_name: &'a str,
    pub created_at: Timestamp,
}

/// Result of [`Bank::list_accounts`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountListing<'a> {
    /// No account is open.
    Empty,

    /// Open accounts in creation order.
    Accounts(Vec<AccountSummary<'a>>),
}

/// Confirmation returned by [`Bank::close_account`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClosedAccount {
    pub number: u32,
    pub closed_at: Timestamp,
}

impl Bank {
    /// Creates an empty registry with default limits and the system clock.
    pub fn new() -> Self {
        Self::with_config(BankConfig::default())
    }

    /// Creates an empty registry with the given limits and the system clock.
    pub fn with_config(config: BankConfig) -> Self {
        Self::with_clock(config, Rc::new(SystemClock))
    }

    /// Creates an empty registry with the given limits and clock.
    pub fn with_clock(config: BankConfig, clock: Rc<dyn Clock>) -> Self {
        Bank {
            customers: HashMap::new(),
            accounts: Vec::new(),
            next_number: 1,
            config,
            clock,
        }
    }

    pub fn config(&self) -> &BankConfig {
        &self.config
    }

    /// Registers a new customer.
    ///
    /// Fails with [`BankError::DuplicateTaxId`] if the tax ID is taken, then
    /// with [`BankError::InvalidBirthDate`] if `birth_date` is not a
    /// `dd-mm-yyyy` calendar date. Nothing is stored on failure.
    pub fn register_customer(
        &mut self,
        full_name: &str,
        tax_id: &str,
        birth_date: &str,
        address: &str,
    ) -> Result<&Customer> {
        let slot = match self.customers.entry(tax_id.to_string()) {
            Entry::Occupied(_) => {
                warn!("Customer with tax ID {} already registered", tax_id);
                return Err(BankError::DuplicateTaxId(tax_id.to_string()));
            }
            Entry::Vacant(slot) => slot,
        };

        if !is_valid_birth_date(birth_date) {
            debug!("Rejected birth date {:?} for tax ID {}", birth_date, tax_id);
            return Err(BankError::InvalidBirthDate(birth_date.to_string()));
        }

        let customer = Customer::new(full_name, tax_id, birth_date, address, self.clock.now());
        debug!("Registered customer {} ({})", tax_id, full_name);
        let customer: &Customer = slot.insert(Rc::new(customer));
        Ok(customer)
    }

    pub fn find_customer(&self, tax_id: &str) -> Option<&Customer> {
        self.customers.get(tax_id).map(Rc::as_ref)
    }

    pub fn customer_count(&self) -> usize {
        self.customers.len()
    }

    /// Opens an account for the customer with `tax_id`.
    ///
    /// Fails with [`BankError::CustomerNotFound`] if no such customer exists.
    pub fn open_account(&mut self, tax_id: &str) -> Result<&Account> {
        let owner = match self.customers.get(tax_id) {
            Some(customer) => Rc::clone(customer),
            None => {
                debug!("Cannot open account: tax ID {} not registered", tax_id);
                return Err(BankError::CustomerNotFound(tax_id.to_string()));
            }
        };

        let number = self.next_number;
        self.next_number += 1;

        let account = Account::new(number, owner, self.config, Rc::clone(&self.clock));
        debug!(
            "Opened account {}-{} for tax ID {}",
            BRANCH_CODE, number, tax_id
        );
        self.accounts.push(account);

        // Safety: the account was pushed above
        Ok(self.accounts.last().expect("account was just pushed"))
    }

    /// Lists open accounts in creation order.
    pub fn list_accounts(&self) -> AccountListing<'_> {
        if self.accounts.is_empty() {
            return AccountListing::Empty;
        }

        AccountListing::Accounts(
            self.accounts
                .iter()
                .map(|account| AccountSummary {
                    branch_code: account.branch_code(),
                    number: account.number(),
                    owner_name: account.owner().full_name(),
                    created_at: account.created_at(),
                })
                .collect(),
        )
    }

    /// Removes the account with `number`.
    ///
    /// Fails with [`BankError::AccountNotFound`] if it is not open. The
    /// owner is unaffected.
    pub fn close_account(&mut self, number: u32) -> Result<ClosedAccount> {
        let index = self.position(number).ok_or_else(|| {
            debug!("Cannot close account {}: not found", number);
            BankError::AccountNotFound(number)
        })?;

        let account = self.accounts.remove(index);
        let closed_at = self.clock.now();
        debug!(
            "Closed account {} of {} with balance {}",
            number,
            account.owner().tax_id(),
            account.balance()
        );

        Ok(ClosedAccount { number, closed_at })
    }

    pub fn find_account(&self, number: u32) -> Option<&Account> {
        self.position(number).map(|i| &self.accounts[i])
    }

    pub fn find_account_mut(&mut self, number: u32) -> Option<&mut Account> {
        self.position(number).map(move |i| &mut self.accounts[i])
    }

    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }

    /// Open accounts in creation order.
    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.iter()
    }

    /// Index of `number` in `accounts`, which stays sorted by number.
    fn position(&self, number: u32) -> Option<usize> {
        self.accounts
            .binary_search_by_key(&number, |a| a.number())
            .ok()
    }
}

impl Default for Bank {
    fn default() -> Self {
        Self::new()
    }
}

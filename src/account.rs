//! Bank account model and operations.
//!
//! Maintains the invariant: `balance >= 0` after every operation.

use crate::clock::{Clock, Timestamp};
use crate::config::BankConfig;
use crate::customer::Customer;
use crate::error::{BankError, Result};
use crate::money::Money;
use crate::movement::{Movement, Statement};
use log::debug;
use std::rc::Rc;

/// Branch every account of a session belongs to.
pub const BRANCH_CODE: &str = "0001";

/// An open bank account.
///
/// # Invariants
///
/// - `balance` is never negative
/// - `withdrawal_count` equals the number of withdrawal movements and never
///   exceeds the configured cap
/// - every failed operation leaves the account untouched
///
/// # Withdrawal Count
///
/// The count covers the whole life of the account. It is not reset on a new
/// day, so once the cap is reached the account can no longer be debited.
///
/// Accounts share their owner and clock through `Rc`, so they are neither
/// `Send` nor `Sync`.
#[derive(Debug)]
pub struct Account {
    number: u32,
    owner: Rc<Customer>,
    balance: Money,
    withdrawal_count: u32,
    movements: Vec<Movement>,
    created_at: Timestamp,
    limits: BankConfig,
    clock: Rc<dyn Clock>,
}

impl Account {
    /// Opens an account with a zero balance, stamped with the clock's time.
    pub fn new(number: u32, owner: Rc<Customer>, limits: BankConfig, clock: Rc<dyn Clock>) -> Self {
        let created_at = clock.now();
        Account {
            number,
            owner,
            balance: Money::ZERO,
            withdrawal_count: 0,
            movements: Vec::new(),
            created_at,
            limits,
            clock,
        }
    }

    pub fn branch_code(&self) -> &'static str {
        BRANCH_CODE
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn owner(&self) -> &Customer {
        &self.owner
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    /// Successful withdrawals since the account was opened.
    pub fn withdrawal_count(&self) -> u32 {
        self.withdrawal_count
    }

    pub fn movements(&self) -> &[Movement] {
        &self.movements
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Deposits funds into the account.
    ///
    /// Returns the new balance, or [`BankError::InvalidAmount`] if `amount`
    /// is not strictly positive, or [`BankError::AmountOutOfRange`] if the
    /// new balance would not be representable.
    pub fn deposit(&mut self, amount: Money) -> Result<Money> {
        if !amount.is_positive() {
            debug!("Account {}: rejected deposit of {}", self.number, amount);
            return Err(BankError::InvalidAmount(amount));
        }
        let Some(balance) = self.balance.checked_add(amount) else {
            debug!(
                "Account {}: rejected deposit of {}, balance would overflow",
                self.number, amount
            );
            return Err(BankError::AmountOutOfRange {
                requested: amount,
                balance: self.balance,
            });
        };

        self.balance = balance;
        self.movements.push(Movement::deposit(amount, self.clock.now()));
        debug!(
            "Account {}: deposited {}, balance {}",
            self.number, amount, self.balance
        );
        Ok(self.balance)
    }

    /// Withdraws funds from the account.
    ///
    /// Rules are checked in this order and the first one that fails wins:
    ///
    /// 1. `amount` above the balance: [`BankError::InsufficientFunds`]
    /// 2. `amount` above the per-withdrawal cap: [`BankError::ExceedsPerWithdrawalLimit`]
    /// 3. withdrawal count at the cap: [`BankError::WithdrawalLimitReached`]
    /// 4. `amount` not positive: [`BankError::InvalidAmount`]
    ///
    /// The financial rules come before the positivity check, so a negative
    /// amount on a fresh account is reported as a valid request would be.
    pub fn withdraw(&mut self, amount: Money) -> Result<Money> {
        if let Err(e) = self.check_withdrawal(amount) {
            debug!("Account {}: rejected withdrawal: {}", self.number, e);
            return Err(e);
        }

        self.balance -= amount;
        self.withdrawal_count += 1;
        self.movements
            .push(Movement::withdrawal(amount, self.clock.now()));
        debug!(
            "Account {}: withdrew {}, balance {}, withdrawals {}/{}",
            self.number,
            amount,
            self.balance,
            self.withdrawal_count,
            self.limits.max_withdrawals_per_account
        );
        Ok(self.balance)
    }

    fn check_withdrawal(&self, amount: Money) -> Result<()> {
        if amount > self.balance {
            return Err(BankError::InsufficientFunds {
                requested: amount,
                available: self.balance,
            });
        }
        if amount > self.limits.max_withdrawal_amount {
            return Err(BankError::ExceedsPerWithdrawalLimit {
                requested: amount,
                limit: self.limits.max_withdrawal_amount,
            });
        }
        if self.withdrawal_count >= self.limits.max_withdrawals_per_account {
            return Err(BankError::WithdrawalLimitReached {
                limit: self.limits.max_withdrawals_per_account,
            });
        }
        if !amount.is_positive() {
            return Err(BankError::InvalidAmount(amount));
        }
        Ok(())
    }

    /// Returns the movement log and current balance.
    pub fn statement(&self) -> Statement<'_> {
        Statement::new(&self.movements, self.balance)
    }

    /// Verifies the invariant: `balance >= 0`.
    #[cfg(debug_assertions)]
    pub fn check_invariant(&self) -> bool {
        self.balance >= Money::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::movement::MovementKind;
    use chrono::{Duration, NaiveDate};
    use std::str::FromStr;

    fn dec(s: &str) -> Money {
        Money::from_str(s).unwrap()
    }

    fn clock() -> Rc<ManualClock> {
        let start = NaiveDate::from_ymd_opt(2024, 5, 10)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        Rc::new(ManualClock::with_step(start, Duration::seconds(1)))
    }

    fn account_with(limits: BankConfig) -> Account {
        let clock = clock();
        let owner = Rc::new(Customer::new(
            "Ana Souza",
            "111",
            "07-09-1990",
            "Rua A, 1",
            clock.now(),
        ));
        Account::new(1, owner, limits, clock)
    }

    fn account() -> Account {
        account_with(BankConfig::default())
    }

    #[test]
    fn test_new_account_is_empty() {
        let account = account();
        assert_eq!(account.branch_code(), "0001");
        assert_eq!(account.number(), 1);
        assert_eq!(account.owner().full_name(), "Ana Souza");
        assert_eq!(account.balance(), Money::ZERO);
        assert_eq!(account.withdrawal_count(), 0);
        assert!(account.movements().is_empty());
        assert_eq!(account.created_at().to_string(), "10/05/2024 08:00:01");
    }

    #[test]
    fn test_deposit_increases_balance_and_logs() {
        let mut account = account();
        assert_eq!(account.deposit(dec("100.00")), Ok(dec("100")));
        assert_eq!(account.deposit(dec("0.50")), Ok(dec("100.50")));

        let log = account.movements();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].kind, MovementKind::Deposit);
        assert_eq!(log[0].amount, dec("100.00"));
        assert_eq!(log[0].at.to_string(), "10/05/2024 08:00:02");
        assert_eq!(log[1].at.to_string(), "10/05/2024 08:00:03");
        assert!(account.check_invariant());
    }

    #[test]
    fn test_deposit_rejects_non_positive() {
        let mut account = account();
        account.deposit(dec("10")).unwrap();

        for bad in ["0", "-5", "-0.01"] {
            assert_eq!(
                account.deposit(dec(bad)),
                Err(BankError::InvalidAmount(dec(bad)))
            );
        }

        assert_eq!(account.balance(), dec("10"));
        assert_eq!(account.movements().len(), 1);
        assert_eq!(account.withdrawal_count(), 0);
    }

    #[test]
    fn test_withdrawal_decreases_balance_and_counts() {
        let mut account = account();
        account.deposit(dec("100")).unwrap();

        assert_eq!(account.withdraw(dec("35.5")), Ok(dec("64.5")));
        assert_eq!(account.withdrawal_count(), 1);
        assert_eq!(account.movements()[1].kind, MovementKind::Withdrawal);
        assert_eq!(account.movements()[1].amount, dec("35.5"));
        assert!(account.check_invariant());
    }

    #[test]
    fn test_withdrawal_of_exact_balance() {
        let mut account = account();
        account.deposit(dec("80")).unwrap();
        assert_eq!(account.withdraw(dec("80")), Ok(Money::ZERO));
        assert!(account.check_invariant());
    }

    #[test]
    fn test_withdrawal_fails_with_insufficient_funds() {
        let mut account = account();
        account.deposit(dec("10.0")).unwrap();

        assert_eq!(
            account.withdraw(dec("15.0")),
            Err(BankError::InsufficientFunds {
                requested: dec("15.0"),
                available: dec("10.0"),
            })
        );
        assert_eq!(account.balance(), dec("10.0"));
        assert_eq!(account.withdrawal_count(), 0);
        assert_eq!(account.movements().len(), 1);
    }

    #[test]
    fn test_withdrawal_over_cap() {
        let mut account = account();
        account.deposit(dec("1000")).unwrap();

        assert_eq!(
            account.withdraw(dec("500.01")),
            Err(BankError::ExceedsPerWithdrawalLimit {
                requested: dec("500.01"),
                limit: dec("500"),
            })
        );
        assert_eq!(account.withdraw(dec("500")), Ok(dec("500")));
    }

    #[test]
    fn test_withdrawal_count_is_a_lifetime_cap() {
        let mut account = account();
        account.deposit(dec("1000")).unwrap();

        for _ in 0..3 {
            account.withdraw(dec("10")).unwrap();
        }
        assert_eq!(
            account.withdraw(dec("10")),
            Err(BankError::WithdrawalLimitReached { limit: 3 })
        );

        account.deposit(dec("10")).unwrap();
        assert_eq!(
            account.withdraw(dec("10")),
            Err(BankError::WithdrawalLimitReached { limit: 3 })
        );
        assert_eq!(account.withdrawal_count(), 3);
        assert_eq!(account.balance(), dec("980"));
    }

    #[test]
    fn test_withdrawal_precedence() {
        let mut account = account_with(BankConfig {
            max_withdrawals_per_account: 0,
            max_withdrawal_amount: dec("500"),
        });

        // Everything fails at once on an empty account: funds win.
        assert!(matches!(
            account.withdraw(dec("600")),
            Err(BankError::InsufficientFunds { .. })
        ));

        account.deposit(dec("1000")).unwrap();
        assert!(matches!(
            account.withdraw(dec("600")),
            Err(BankError::ExceedsPerWithdrawalLimit { .. })
        ));
        assert!(matches!(
            account.withdraw(dec("-5")),
            Err(BankError::WithdrawalLimitReached { .. })
        ));
    }

    #[test]
    fn test_non_positive_withdrawal_is_invalid_amount() {
        let mut account = account();
        assert_eq!(account.withdraw(Money::ZERO), Err(BankError::InvalidAmount(Money::ZERO)));
        assert_eq!(
            account.withdraw(dec("-1")),
            Err(BankError::InvalidAmount(dec("-1")))
        );
        assert_eq!(account.balance(), Money::ZERO);
        assert_eq!(account.withdrawal_count(), 0);
        assert!(account.movements().is_empty());
    }

    #[test]
    fn test_statement_reflects_log() {
        let mut account = account();
        assert_eq!(
            account.statement(),
            Statement::NoMovements {
                balance: Money::ZERO
            }
        );

        account.deposit(dec("100")).unwrap();
        account.withdraw(dec("40")).unwrap();
        let statement = account.statement();

        assert_eq!(statement.balance(), dec("60"));
        assert_eq!(statement.movements(), account.movements());
        assert_eq!(statement.count(MovementKind::Deposit), 1);
        assert_eq!(statement.count(MovementKind::Withdrawal), 1);
    }

    #[test]
    fn test_custom_limits() {
        let mut account = account_with(BankConfig {
            max_withdrawals_per_account: 1,
            max_withdrawal_amount: dec("20"),
        });
        account.deposit(dec("100")).unwrap();

        assert!(matches!(
            account.withdraw(dec("25")),
            Err(BankError::ExceedsPerWithdrawalLimit { .. })
        ));
        assert_eq!(account.withdraw(dec("20")), Ok(dec("80")));
        assert_eq!(
            account.withdraw(dec("1")),
            Err(BankError::WithdrawalLimitReached { limit: 1 })
        );
    }
}

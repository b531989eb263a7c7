//! Line-oriented text menu over a [`Bank`].
//!
//! This is the only place that talks to the user: it parses answers, calls
//! registry and account operations, and turns their results into text.

use crate::bank::{AccountListing, Bank};
use crate::error::{AppError, BankError};
use crate::money::Money;
use crate::movement::Statement;
use log::debug;
use std::io::{BufRead, Write};
use std::str::FromStr;

const MENU: &str = "
================ MAIN MENU ================
[1] Deposit
[2] Withdraw
[3] Statement
[4] Open account
[5] List accounts
[6] Register customer
[7] Close account
[0] Exit
===========================================
Select an option: ";

const RULE: &str = "------------------------------------------";

/// An interactive session reading answers from `input` and writing to `output`.
///
/// End of input ends the session as if `0` had been chosen.
pub struct Menu<'a, R, W> {
    bank: &'a mut Bank,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(bank: &'a mut Bank, input: R, output: W) -> Self {
        Menu {
            bank,
            input,
            output,
        }
    }

    /// Shows the menu and handles choices until exit or end of input.
    pub fn run(&mut self) -> Result<(), AppError> {
        loop {
            let Some(choice) = self.prompt(MENU)? else {
                break;
            };
            debug!("Menu choice {:?}", choice);

            match choice.as_str() {
                "1" => self.deposit()?,
                "2" => self.withdraw()?,
                "3" => self.statement()?,
                "4" => self.open_account()?,
                "5" => self.list_accounts()?,
                "6" => self.register_customer()?,
                "7" => self.close_account()?,
                "0" => {
                    writeln!(self.output, "\nSession closed. Thank you for banking with us!")?;
                    break;
                }
                _ => writeln!(self.output, "\nInvalid option. Please choose one from the menu.")?,
            }
        }

        self.output.flush()?;
        Ok(())
    }

    fn deposit(&mut self) -> Result<(), AppError> {
        let Some(number) = self.select_account()? else {
            return Ok(());
        };
        let Some(amount) = self.read_amount("Deposit amount: ")? else {
            return Ok(());
        };

        let outcome = match self.bank.find_account_mut(number) {
            Some(account) => account.deposit(amount),
            None => Err(BankError::AccountNotFound(number)),
        };
        match outcome {
            Ok(balance) => {
                writeln!(self.output, "\nDeposit completed.")?;
                writeln!(self.output, "Current balance: {}", balance)?;
            }
            Err(e) => self.report(&e)?,
        }
        Ok(())
    }

    fn withdraw(&mut self) -> Result<(), AppError> {
        let Some(number) = self.select_account()? else {
            return Ok(());
        };
        let Some(amount) = self.read_amount("Withdrawal amount: ")? else {
            return Ok(());
        };

        let outcome = match self.bank.find_account_mut(number) {
            Some(account) => account.withdraw(amount),
            None => Err(BankError::AccountNotFound(number)),
        };
        match outcome {
            Ok(balance) => {
                writeln!(self.output, "\nWithdrawal completed.")?;
                writeln!(self.output, "Current balance: {}", balance)?;
            }
            Err(e) => self.report(&e)?,
        }
        Ok(())
    }

    fn statement(&mut self) -> Result<(), AppError> {
        let Some(number) = self.select_account()? else {
            return Ok(());
        };
        let Some(account) = self.bank.find_account(number) else {
            return Ok(());
        };

        writeln!(self.output, "\nAccount Statement")?;
        writeln!(self.output, "{}", RULE)?;
        match account.statement() {
            Statement::NoMovements { .. } => {
                writeln!(self.output, "No movements recorded.")?;
            }
            Statement::Movements { movements, .. } => {
                for movement in movements {
                    writeln!(
                        self.output,
                        "{}:\t{} | {}",
                        movement.kind, movement.amount, movement.at
                    )?;
                }
            }
        }
        writeln!(self.output, "Available balance: {}", account.balance())?;
        writeln!(self.output, "{}", RULE)?;
        Ok(())
    }

    fn open_account(&mut self) -> Result<(), AppError> {
        let Some(tax_id) = self.prompt("Account holder's tax ID: ")? else {
            return Ok(());
        };

        match self.bank.open_account(&tax_id) {
            Ok(account) => {
                writeln!(self.output, "\nAccount opened.")?;
                writeln!(
                    self.output,
                    "Branch: {} | Account: {} | Holder: {}",
                    account.branch_code(),
                    account.number(),
                    account.owner().full_name()
                )?;
                writeln!(self.output, "Opened at: {}", account.created_at())?;
            }
            Err(e) => self.report(&e)?,
        }
        Ok(())
    }

    fn list_accounts(&mut self) -> Result<(), AppError> {
        let accounts = match self.bank.list_accounts() {
            AccountListing::Empty => {
                writeln!(self.output, "\nNo accounts have been opened yet.")?;
                return Ok(());
            }
            AccountListing::Accounts(accounts) => accounts,
        };

        let heavy = "=".repeat(50);
        let light = "-".repeat(50);
        writeln!(self.output, "\nOpen Accounts")?;
        writeln!(self.output, "{}", heavy)?;
        for summary in accounts {
            writeln!(
                self.output,
                "Branch: {} | Account: {} | Holder: {}",
                summary.branch_code, summary.number, summary.owner_name
            )?;
            writeln!(self.output, "Opened at: {}", summary.created_at)?;
            writeln!(self.output, "{}", light)?;
        }
        writeln!(self.output, "{}", heavy)?;
        Ok(())
    }

    fn register_customer(&mut self) -> Result<(), AppError> {
        let Some(tax_id) = self.prompt("Tax ID (digits only): ")? else {
            return Ok(());
        };
        if self.bank.find_customer(&tax_id).is_some() {
            return self.report(&BankError::DuplicateTaxId(tax_id));
        }

        let Some(full_name) = self.prompt("Full name: ")? else {
            return Ok(());
        };
        let Some(birth_date) = self.prompt("Birth date (dd-mm-yyyy): ")? else {
            return Ok(());
        };
        let Some(address) = self.prompt("Full address: ")? else {
            return Ok(());
        };

        match self
            .bank
            .register_customer(&full_name, &tax_id, &birth_date, &address)
        {
            Ok(customer) => {
                writeln!(self.output, "\nCustomer registered.")?;
                writeln!(self.output, "Registered at: {}", customer.created_at())?;
            }
            Err(e) => self.report(&e)?,
        }
        Ok(())
    }

    fn close_account(&mut self) -> Result<(), AppError> {
        if self.bank.account_count() == 0 {
            writeln!(self.output, "\nNo accounts available to close.")?;
            return Ok(());
        }
        let Some(number) = self.read_number("Number of the account to close: ")? else {
            return Ok(());
        };

        match self.bank.close_account(number) {
            Ok(closed) => writeln!(
                self.output,
                "\nAccount {} closed at {}.",
                closed.number, closed.closed_at
            )?,
            Err(e) => self.report(&e)?,
        }
        Ok(())
    }

    /// Asks for an account number and checks that it exists.
    fn select_account(&mut self) -> Result<Option<u32>, AppError> {
        if self.bank.account_count() == 0 {
            writeln!(
                self.output,
                "\nNo accounts available. Open an account before making transactions."
            )?;
            return Ok(None);
        }
        let Some(number) = self.read_number("Account number: ")? else {
            return Ok(None);
        };
        if self.bank.find_account(number).is_none() {
            self.report(&BankError::AccountNotFound(number))?;
            return Ok(None);
        }
        Ok(Some(number))
    }

    fn read_number(&mut self, label: &str) -> Result<Option<u32>, AppError> {
        self.read_parsed(label, "account number")
    }

    fn read_amount(&mut self, label: &str) -> Result<Option<Money>, AppError> {
        self.read_parsed(label, "amount")
    }

    /// Prompts and parses; reports unparseable answers and yields `None`.
    fn read_parsed<T: FromStr>(&mut self, label: &str, what: &str) -> Result<Option<T>, AppError> {
        let Some(answer) = self.prompt(label)? else {
            return Ok(None);
        };
        match answer.parse() {
            Ok(value) => Ok(Some(value)),
            Err(_) => {
                writeln!(self.output, "\nInvalid {}: {:?}", what, answer)?;
                Ok(None)
            }
        }
    }

    /// Writes `label` and reads one trimmed line; `None` at end of input.
    fn prompt(&mut self, label: &str) -> Result<Option<String>, AppError> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn report(&mut self, error: &BankError) -> Result<(), AppError> {
        writeln!(self.output, "\n{}", describe(error))?;
        Ok(())
    }
}

/// User-facing text for a rejected operation.
fn describe(error: &BankError) -> String {
    match error {
        BankError::InvalidAmount(_) => "Invalid operation: enter a positive amount.".to_string(),
        BankError::AmountOutOfRange { .. } => {
            "Operation not authorized: the amount is too large for this account.".to_string()
        }
        BankError::InsufficientFunds { .. } => {
            "Operation not authorized: insufficient balance.".to_string()
        }
        BankError::ExceedsPerWithdrawalLimit { limit, .. } => format!(
            "Operation not authorized: the amount exceeds the per-withdrawal limit of {}.",
            limit
        ),
        BankError::WithdrawalLimitReached { limit } => format!(
            "Operation not authorized: withdrawal limit of {} reached.",
            limit
        ),
        BankError::DuplicateTaxId(_) => {
            "Registration failed: a customer with this tax ID already exists.".to_string()
        }
        BankError::InvalidBirthDate(_) => {
            "Registration failed: birth date must be a valid dd-mm-yyyy date.".to_string()
        }
        BankError::CustomerNotFound(_) => {
            "Could not open the account: customer not found.".to_string()
        }
        BankError::AccountNotFound(_) => {
            "Account not found. Check the number entered.".to_string()
        }
    }
}

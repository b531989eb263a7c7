//! Withdrawal limits shared by every account of a registry.

use crate::error::AppError;
use crate::money::Money;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Limits applied to withdrawals.
///
/// Missing fields in a config file fall back to the defaults: three
/// withdrawals per account and 500 per withdrawal.
///
/// ```
/// use retail_bank::BankConfig;
///
/// let config = BankConfig::from_json(r#"{ "max_withdrawals_per_account": 5 }"#).unwrap();
/// assert_eq!(config.max_withdrawals_per_account, 5);
/// assert_eq!(config.max_withdrawal_amount.to_string(), "500.00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BankConfig {
    /// Lifetime number of successful withdrawals allowed per account.
    pub max_withdrawals_per_account: u32,

    /// Largest amount a single withdrawal may take.
    pub max_withdrawal_amount: Money,
}

impl BankConfig {
    pub const DEFAULT_MAX_WITHDRAWALS: u32 = 3;
    pub const DEFAULT_MAX_WITHDRAWAL_AMOUNT: u32 = 500;

    /// Parses and validates a JSON config document.
    pub fn from_json(json: &str) -> Result<Self, AppError> {
        let config: BankConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Rejects a per-withdrawal cap that no withdrawal could satisfy.
    pub fn validate(&self) -> Result<(), AppError> {
        if !self.max_withdrawal_amount.is_positive() {
            return Err(AppError::InvalidConfig(format!(
                "max_withdrawal_amount must be positive, got {}",
                self.max_withdrawal_amount
            )));
        }
        Ok(())
    }
}

impl Default for BankConfig {
    fn default() -> Self {
        BankConfig {
            max_withdrawals_per_account: Self::DEFAULT_MAX_WITHDRAWALS,
            max_withdrawal_amount: Money::from(Self::DEFAULT_MAX_WITHDRAWAL_AMOUNT),
        }
    }
}

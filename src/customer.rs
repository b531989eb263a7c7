//! Customer identity record.

use crate::clock::Timestamp;
use chrono::NaiveDate;

/// Format accepted for birth dates.
pub const BIRTH_DATE_FORMAT: &str = "%d-%m-%Y";

/// A registered bank customer.
///
/// Customers are never changed after registration. Tax ID uniqueness is the
/// registry's concern, not the record's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    full_name: String,
    tax_id: String,
    birth_date: String,
    address: String,
    created_at: Timestamp,
}

impl Customer {
    pub fn new(
        full_name: impl Into<String>,
        tax_id: impl Into<String>,
        birth_date: impl Into<String>,
        address: impl Into<String>,
        created_at: Timestamp,
    ) -> Self {
        Customer {
            full_name: full_name.into(),
            tax_id: tax_id.into(),
            birth_date: birth_date.into(),
            address: address.into(),
            created_at,
        }
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn tax_id(&self) -> &str {
        &self.tax_id
    }

    /// Birth date exactly as it was entered.
    pub fn birth_date(&self) -> &str {
        &self.birth_date
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }
}

/// Returns `true` if `value` is a real calendar date written `dd-mm-yyyy`.
pub fn is_valid_birth_date(value: &str) -> bool {
    let bytes = value.as_bytes();
    let shaped = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            2 | 5 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    shaped && NaiveDate::parse_from_str(value, BIRTH_DATE_FORMAT).is_ok()
}

//! Ledger entry models for CSV parsing and internal representation.

use crate::amount::Amount;
use crate::error::AmountError;
use serde::Deserialize;
use std::str::FromStr;
use thiserror::Error;

/// Raw ledger row as read from CSV.
#[derive(Debug, Deserialize)]
pub struct EntryRecord {
    /// Entry type: credit or debit
    #[serde(rename = "type")]
    pub entry_type: String,

    /// Account the entry is booked on
    pub account: String,

    /// Canonical amount string, e.g. `KUDOS:10.5`
    pub amount: String,
}

/// Why a row could not be turned into an [`Entry`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EntryRejection {
    /// Type is neither credit nor debit
    #[error("unknown entry type {0:?}")]
    UnknownType(String),

    /// Account column is empty
    #[error("missing account")]
    MissingAccount,

    /// Amount column failed to parse
    #[error("{0}")]
    InvalidAmount(AmountError),
}

impl EntryRecord {
    /// Parses the raw CSV record into a typed entry.
    pub fn parse(&self) -> Result<Entry, EntryRejection> {
        let entry_type = self.entry_type.trim().to_lowercase();
        let account = self.account.trim();
        if account.is_empty() {
            return Err(EntryRejection::MissingAccount);
        }

        let kind = match entry_type.as_str() {
            "credit" => EntryKind::Credit,
            "debit" => EntryKind::Debit,
            _ => return Err(EntryRejection::UnknownType(self.entry_type.clone())),
        };
        let amount = Amount::from_str(&self.amount).map_err(EntryRejection::InvalidAmount)?;

        Ok(Entry {
            account: account.to_string(),
            kind,
            amount,
        })
    }
}

/// A parsed and validated entry ready for booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub account: String,
    pub kind: EntryKind,
    pub amount: Amount,
}

/// Direction of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Adds to the balance.
    Credit,

    /// Subtracts from the balance; never drives it below zero.
    Debit,
}

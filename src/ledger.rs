//! Streaming ledger that books credits and debits onto per-account balances.
//!
//! Rows are read one at a time; a row that cannot be parsed or booked is
//! logged and skipped without affecting any balance.

use crate::balance::Balance;
use crate::currency::CurrencyRegistry;
use crate::entry::{Entry, EntryKind, EntryRecord};
use crate::error::Result;
use csv::{ReaderBuilder, Trim};
use log::{debug, warn};
use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::sync::Arc;

/// The ledger engine.
///
/// Keeps one [`Balance`] per `(account, currency)` and a shared
/// [`CurrencyRegistry`] for the display column of the output.
///
/// # Output Ordering
///
/// Balances are written sorted by account, then currency.
pub struct Ledger {
    /// Balances keyed by `(account, currency)`.
    balances: BTreeMap<(String, String), Balance>,

    /// Display specifications; replaced as a whole, never edited.
    registry: Arc<CurrencyRegistry>,
}

impl Ledger {
    /// Creates an empty ledger formatting with `registry`.
    pub fn new(registry: Arc<CurrencyRegistry>) -> Self {
        Ledger {
            balances: BTreeMap::new(),
            registry,
        }
    }

    /// Swaps in a new registry for subsequent output.
    pub fn replace_registry(&mut self, registry: Arc<CurrencyRegistry>) {
        self.registry = registry;
    }

    /// Processes entries from a CSV reader in streaming fashion.
    ///
    /// Invalid rows are logged at warn level and skipped.
    pub fn process_csv<R: Read>(&mut self, reader: R) -> Result<()> {
        let mut csv_reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        for (row_idx, result) in csv_reader.deserialize::<EntryRecord>().enumerate() {
            let row_num = row_idx + 2; // 1-indexed, accounting for header row

            match result {
                Ok(record) => match record.parse() {
                    Ok(entry) => self.book(entry, row_num),
                    Err(rejection) => warn!("Row {}: {}", row_num, rejection),
                },
                Err(e) => {
                    warn!("Row {}: CSV parse error: {}", row_num, e);
                }
            }
        }

        Ok(())
    }

    /// Books a single entry, creating the balance on first touch.
    pub fn book(&mut self, entry: Entry, row: usize) {
        let key = (entry.account.clone(), entry.amount.currency().to_string());
        let balance = self
            .balances
            .entry(key)
            .or_insert_with(|| Balance::new(entry.account.as_str(), entry.amount.currency()));

        let booked = match entry.kind {
            EntryKind::Credit => balance.credit(&entry.amount),
            EntryKind::Debit => balance.debit(&entry.amount),
        };

        match booked {
            Ok(()) => debug!(
                "Row {}: {:?} {} on {}, balance {}",
                row,
                entry.kind,
                entry.amount,
                entry.account,
                balance.amount()
            ),
            Err(e) => warn!(
                "Row {}: {:?} of {} on {} refused: {}",
                row, entry.kind, entry.amount, entry.account, e
            ),
        }
    }

    /// Balance of `account` in `currency`, if one was ever touched.
    pub fn balance(&self, account: &str, currency: &str) -> Option<&Balance> {
        self.balances
            .get(&(account.to_string(), currency.to_string()))
    }

    /// Writes final balances to CSV.
    ///
    /// `balance` is the canonical string; `display` follows the registry and
    /// falls back to the canonical string for unregistered currencies.
    pub fn write_output<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["account", "currency", "balance", "display"])?;

        for balance in self.balances.values() {
            let canonical = balance.amount().to_string();
            let display = match self.registry.format(balance.amount()) {
                Ok(display) => display,
                Err(e) => {
                    debug!("{}, showing canonical form", e);
                    canonical.clone()
                }
            };

            csv_writer.write_record([
                balance.account.as_str(),
                balance.currency(),
                canonical.as_str(),
                display.as_str(),
            ])?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new(Arc::new(CurrencyRegistry::with_defaults()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::CurrencySpecification;
    use std::io::Cursor;

    fn process_csv_str(csv: &str) -> Ledger {
        let mut ledger = Ledger::default();
        ledger.process_csv(Cursor::new(csv)).unwrap();
        ledger
    }

    fn balance_of(ledger: &Ledger, account: &str, currency: &str) -> String {
        ledger
            .balance(account, currency)
            .unwrap()
            .amount()
            .to_string()
    }

    #[test]
    fn test_credits_accumulate() {
        let csv = r#"type,account,amount
credit,alice,EUR:1.5
credit,alice,EUR:23.70007
credit,bob,EUR:20"#;

        let ledger = process_csv_str(csv);
        assert_eq!(balance_of(&ledger, "alice", "EUR"), "EUR:25.20007");
        assert_eq!(balance_of(&ledger, "bob", "EUR"), "EUR:20");
    }

    #[test]
    fn test_debit() {
        let csv = r#"type,account,amount
credit,alice,EUR:25.20007
debit,alice,EUR:23.70007"#;

        let ledger = process_csv_str(csv);
        assert_eq!(balance_of(&ledger, "alice", "EUR"), "EUR:1.5");
    }

    #[test]
    fn test_debit_underflow_is_skipped() {
        let csv = r#"type,account,amount
credit,alice,EUR:10
debit,alice,EUR:15
debit,alice,EUR:4"#;

        let ledger = process_csv_str(csv);
        assert_eq!(balance_of(&ledger, "alice", "EUR"), "EUR:6");
    }

    #[test]
    fn test_debit_without_credit_creates_zero_balance() {
        let csv = r#"type,account,amount
debit,carol,KUDOS:1"#;

        let ledger = process_csv_str(csv);
        assert_eq!(balance_of(&ledger, "carol", "KUDOS"), "KUDOS:0");
    }

    #[test]
    fn test_currencies_are_kept_apart() {
        let csv = r#"type,account,amount
credit,alice,EUR:1
credit,alice,KUDOS:2
debit,alice,KUDOS:0.5"#;

        let ledger = process_csv_str(csv);
        assert_eq!(balance_of(&ledger, "alice", "EUR"), "EUR:1");
        assert_eq!(balance_of(&ledger, "alice", "KUDOS"), "KUDOS:1.5");
    }

    #[test]
    fn test_invalid_rows_are_skipped() {
        let csv = r#"type,account,amount
credit,alice,EUR:1
credit,alice,EUR:1.123456789
refund,alice,EUR:1
credit,alice,EUR 1
credit,,EUR:1
credit,alice,EUR:2"#;

        let ledger = process_csv_str(csv);
        assert_eq!(balance_of(&ledger, "alice", "EUR"), "EUR:3");
    }

    #[test]
    fn test_whitespace_handling() {
        let csv = r#"type, account, amount
credit, alice, EUR:10
debit, alice, EUR:3"#;

        let ledger = process_csv_str(csv);
        assert_eq!(balance_of(&ledger, "alice", "EUR"), "EUR:7");
    }

    #[test]
    fn test_output_format() {
        let csv = r#"type,account,amount
credit,bob,KUDOS:50.234
credit,alice,FOO:1.5
credit,alice,EUR:50.234"#;

        let ledger = process_csv_str(csv);
        let mut output = Vec::new();
        ledger.write_output(&mut output).unwrap();

        let output_str = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = output_str.lines().collect();
        assert_eq!(
            lines,
            [
                "account,currency,balance,display",
                "alice,EUR,EUR:50.234,€ 50.23",
                "alice,FOO,FOO:1.5,FOO:1.5",
                "bob,KUDOS,KUDOS:50.234,KUDOS 50.23",
            ]
        );
    }

    #[test]
    fn test_replace_registry() {
        let mut ledger = process_csv_str("type,account,amount\ncredit,alice,FOO:1.5\n");
        ledger.replace_registry(Arc::new(
            CurrencyRegistry::new().insert("FOO", CurrencySpecification::new("Foo", 3, "ƒ")),
        ));

        let mut output = Vec::new();
        ledger.write_output(&mut output).unwrap();
        assert!(String::from_utf8(output).unwrap().contains("alice,FOO,FOO:1.5,ƒ 1.500"));
    }
}

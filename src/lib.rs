//! # Taler Amount
//!
//! Fixed-point monetary amounts in the GNU Taler wire format
//! `<currency>:<value>[.<fraction>]`, with exact arithmetic and
//! currency-aware display, plus a small streaming ledger built on top.
//!
//! ## Design Principles
//!
//! - **Fixed-point representation**: whole units plus a fraction in units of 10^-8
//! - **Checked arithmetic**: overflow, underflow and currency mismatches are errors
//! - **Injected registry**: display rules are passed in, never read from a global
//! - **No floating point**: parsing and formatting scale with integers only
//!
//! ## Example
//!
//! ```
//! use taler_amount::{Amount, CurrencyRegistry};
//!
//! let registry = CurrencyRegistry::with_defaults();
//! let price: Amount = "EUR:1.5".parse().unwrap();
//! let fee: Amount = "EUR:23.70007".parse().unwrap();
//!
//! let total = price.checked_add(&fee).unwrap();
//! assert_eq!(total.to_string(), "EUR:25.20007");
//! assert_eq!(total.format(&registry).unwrap(), "€ 25.20");
//! ```

pub mod amount;
pub mod arith;
pub mod balance;
pub mod currency;
pub mod decimal;
pub mod entry;
pub mod error;
pub mod format;
pub mod ledger;
pub mod parse;

pub use amount::{Amount, FRACTIONAL_BASE, FRACTIONAL_LENGTH, MAX_AMOUNT_VALUE};
pub use balance::Balance;
pub use currency::{CurrencyRegistry, CurrencySpecification, MAX_DISPLAY_DIGITS};
pub use entry::{Entry, EntryKind, EntryRecord, EntryRejection};
pub use error::{AmountError, LedgerError, RegistryError, Result};
pub use format::format_with_specification;
pub use ledger::Ledger;
pub use parse::parse_amount;

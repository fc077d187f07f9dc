//! Taler Amount ledger CLI
//!
//! Books a CSV of credits and debits and prints the final balance of every
//! account in canonical and display form.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- ledger.csv [currencies.json] > balances.csv
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use std::env;
use std::fs::File;
use std::io::{self, BufReader};
use std::process;
use std::sync::Arc;
use taler_amount::{CurrencyRegistry, Ledger, LedgerError, Result};

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        return Err(LedgerError::MissingArgument);
    }

    let registry = match args.get(2) {
        Some(path) => {
            let file = File::open(path)?;
            CurrencyRegistry::from_json_reader(BufReader::new(file))?
        }
        None => CurrencyRegistry::with_defaults(),
    };

    let input_path = &args[1];
    let file = File::open(input_path)?;
    let reader = BufReader::new(file);

    let mut ledger = Ledger::new(Arc::new(registry));
    ledger.process_csv(reader)?;

    let stdout = io::stdout();
    let handle = stdout.lock();
    ledger.write_output(handle)?;

    Ok(())
}

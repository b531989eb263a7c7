//! Retail Bank CLI
//!
//! Interactive menu for registering customers, opening accounts and moving
//! money, reading answers from stdin.
//!
//! # Usage
//!
//! ```bash
//! cargo run                 # default limits
//! cargo run -- limits.json  # limits from a config file
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use retail_bank::{AppError, Bank, BankConfig, Menu};
use std::env;
use std::io;
use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    let config = match env::args().nth(1) {
        Some(path) => BankConfig::load(path)?,
        None => BankConfig::default(),
    };

    let mut bank = Bank::with_config(config);

    let stdin = io::stdin();
    let stdout = io::stdout();
    Menu::new(&mut bank, stdin.lock(), stdout.lock()).run()
}

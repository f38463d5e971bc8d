use std::fs::File;

use anyhow::{Context, Result};
use bank_ledger::{
    bin_utils::{Service, ServiceError, logging},
    processor::BankError,
};

fn main() -> Result<()> {
    logging::init();

    let filename = std::env::args()
        .nth(1)
        .context("Expected a file name as the first argument")?;
    let file = File::open(&filename).with_context(|| format!("Failed to open `{filename}`"))?;

    let service = Service {
        input: file,
        output: &mut std::io::stdout(),
        error_printer: Box::new(|line, err| {
            match err {
                ServiceError::Bank(BankError::Validation(_)) => {
                    // rejected operations are already logged by the engine
                }
                err => eprintln!("Error at line {line}: {err}"),
            }
        }),
    };
    service.run()
}

//! Drives a [`TransferEngine`] from a CSV command script and prints a summary
//! of every account afterwards. Kept in the library so integration tests can
//! run it directly.

use std::io::{Read, Write};

use crate::{
    command::{BankCommand, CommandError},
    processor::{Bank, BankError, transfer_engine::TransferEngine},
};
use anyhow::Result;
use csv_parser::CsvCommandParser;
use csv_printer::{AccountSummary, print_summaries};
use thiserror::Error;

pub mod csv_parser;
pub mod csv_printer;
pub mod logging;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Malformed row: {0}")]
    Row(#[from] csv::Error),
    #[error(transparent)]
    Command(#[from] CommandError),
    #[error(transparent)]
    Bank(#[from] BankError),
}

pub struct Service<'w, R, W: 'w> {
    pub input: R,
    pub output: &'w mut W,
    pub error_printer: Box<dyn FnMut(u64, ServiceError)>,
}

impl<'w, R, W> Service<'w, R, W>
where
    R: Read,
    W: Write + 'w,
{
    pub fn run(mut self) -> Result<()> {
        let parser = CsvCommandParser::new(self.input);

        let engine: TransferEngine = TransferEngine::default();

        for (line, row) in parser {
            if let Err(err) = Self::execute(&engine, row) {
                (self.error_printer)(line, err);
            }
        }

        let summaries = engine
            .accounts()?
            .into_iter()
            .map(|account| -> Result<AccountSummary, BankError> {
                let statement = engine.statement(account.account_number())?;
                Ok(AccountSummary {
                    account: account.account_number().to_owned(),
                    balance: statement.current_balance,
                    entries: statement.transactions.len(),
                })
            })
            .collect::<Result<Vec<_>, BankError>>()?;

        print_summaries(self.output, summaries)
    }

    fn execute(
        engine: &impl Bank,
        row: csv::Result<csv_parser::CommandRow>,
    ) -> Result<(), ServiceError> {
        let row = row?;
        match BankCommand::parse_command(row.kind, row.account, row.counterparty, row.amount)? {
            BankCommand::CreateAccount(account) => {
                engine.create_account(account)?;
            }
            BankCommand::Transfer(request) => {
                engine.transfer(&request)?;
            }
        }
        Ok(())
    }
}

use std::io::Read;

use crate::{account::AccountNumber, command::CommandKind};
use csv::{DeserializeRecordsIntoIter, Trim};
use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CommandRow {
    #[serde(rename = "type")]
    pub kind: CommandKind,
    pub account: AccountNumber,
    pub counterparty: Option<AccountNumber>,
    pub amount: Option<Decimal>,
}

/// Reads a command script in CSV format, yielding each row with its line number.
pub struct CsvCommandParser<R> {
    iter: DeserializeRecordsIntoIter<R, CommandRow>,
}

impl<R> CsvCommandParser<R>
where
    R: Read,
{
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(source);

        Self {
            iter: reader.into_deserialize(),
        }
    }
}

impl<R> Iterator for CsvCommandParser<R>
where
    R: Read,
{
    type Item = (u64, csv::Result<CommandRow>);

    fn next(&mut self) -> Option<Self::Item> {
        let curr_line = self.iter.reader().position().line();
        self.iter.next().map(|row| (curr_line, row))
    }
}

use std::io::Write;

use crate::account::AccountNumber;
use anyhow::Context;
use rust_decimal::Decimal;
use serde::Serialize;

/// One output row: the account, its balance and how many ledger entries it owns.
#[derive(Debug, Serialize)]
pub struct AccountSummary {
    pub account: AccountNumber,
    pub balance: Decimal,
    pub entries: usize,
}

pub fn print_summaries<W: Write>(
    output: &mut W,
    summaries: impl IntoIterator<Item = AccountSummary>,
) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_writer(output);
    for summary in summaries {
        let account = summary.account.clone();
        writer
            .serialize(summary)
            .with_context(|| format!("Failed to write summary of account `{account}`"))?;
    }
    writer.flush().context("Failed to flush CSV writer")
}

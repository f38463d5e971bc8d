use rust_decimal::Decimal;

use crate::{
    processor::BankError,
    store::{AccountStore, LedgerStore},
    transaction::Transaction,
};

/// Read-only view of one account: its balance and its ledger entries in the
/// order they were recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountStatement {
    pub current_balance: Decimal,
    pub transactions: Vec<Transaction>,
}

pub fn build_statement<S>(store: &S, account_number: &str) -> Result<AccountStatement, BankError>
where
    S: AccountStore + LedgerStore + ?Sized,
{
    let account = store
        .find_by_number(account_number)?
        .ok_or_else(|| BankError::AccountNotFound {
            account_number: account_number.to_owned(),
        })?;
    Ok(AccountStatement {
        current_balance: account.current_balance(),
        transactions: store.find_by_account(account_number)?,
    })
}

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    account::{Account, AccountNumber},
    statement::AccountStatement,
    store::StorageError,
    transaction::Transaction,
    validator::ValidationError,
};

pub mod transfer_engine;

#[derive(Debug, Error)]
pub enum BankError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Account not found {account_number}")]
    AccountNotFound { account_number: AccountNumber },
    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    pub from_account_number: AccountNumber,
    pub to_account_number: AccountNumber,
    pub amount: Decimal,
}

impl TransferRequest {
    pub fn new(
        from_account_number: impl Into<AccountNumber>,
        to_account_number: impl Into<AccountNumber>,
        amount: Decimal,
    ) -> Self {
        Self {
            from_account_number: from_account_number.into(),
            to_account_number: to_account_number.into(),
            amount,
        }
    }
}

/// Operations exposed to callers. Every failure is reported, none is retried.
pub trait Bank {
    /// Returns the account as it was persisted.
    fn create_account(&self, account: Account) -> Result<Account, BankError>;

    /// Moves funds and returns the OUT ledger entry of the transfer.
    fn transfer(&self, request: &TransferRequest) -> Result<Transaction, BankError>;

    fn statement(&self, account_number: &str) -> Result<AccountStatement, BankError>;

    fn accounts(&self) -> Result<Vec<Account>, BankError>;
}

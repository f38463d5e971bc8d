use thiserror::Error;

use crate::{
    account::{Account, AccountNumber},
    transaction::{EntryId, Transaction},
};

pub mod in_memory;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("Ledger entry {id} does not exist")]
    EntryNotFound { id: EntryId },
    #[error("Account '{account_number}' was not persisted")]
    AccountNotPersisted { account_number: AccountNumber },
    #[error("Storage backend failure: {0}")]
    Backend(String),
}

/// Keyed account balances.
pub trait AccountStore {
    /// Absence is a normal outcome, not an error.
    fn find_by_number(&self, account_number: &str) -> Result<Option<Account>, StorageError>;
    /// Inserts or replaces the account stored under the same number.
    fn save_account(&mut self, account: Account) -> Result<Account, StorageError>;
    fn find_all(&self) -> Result<Vec<Account>, StorageError>;
}

/// Append-only ledger.
pub trait LedgerStore {
    /// An entry without an id is appended and gets the next id. An entry that
    /// already carries an id overwrites the stored entry with that id.
    fn save_entry(&mut self, entry: Transaction) -> Result<Transaction, StorageError>;
    /// Entries owned by the account, in the order they were appended.
    fn find_by_account(&self, account_number: &str) -> Result<Vec<Transaction>, StorageError>;
}

/// Both stores seen through one unit of work.
pub trait Session: AccountStore + LedgerStore {}

impl<T: AccountStore + LedgerStore + ?Sized> Session for T {}

pub trait Storage: Send + Sync {
    /// Runs `work` as one atomic unit: everything it wrote is committed when it
    /// returns `Ok` and discarded when it returns `Err` or unwinds. Other units
    /// never observe a partially applied one.
    fn atomically<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce(&mut dyn Session) -> Result<T, E>,
        E: From<StorageError>;
}

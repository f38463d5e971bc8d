use std::{
    collections::{BTreeMap, HashMap},
    sync::{Mutex, PoisonError},
};

use crate::{
    account::{Account, AccountNumber},
    transaction::{EntryId, Transaction},
};

use super::{AccountStore, LedgerStore, Session, Storage, StorageError};

#[derive(Debug, Default)]
struct State {
    accounts: BTreeMap<AccountNumber, Account>,
    // entry with id `n` lives at index `n - 1`
    entries: Vec<Transaction>,
}

/// Storage kept in process memory behind a single lock.
///
/// Units of work are applied in place and undone on failure, so a unit costs
/// only what it touches.
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    state: Mutex<State>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for InMemoryStorage {
    fn atomically<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce(&mut dyn Session) -> Result<T, E>,
        E: From<StorageError>,
    {
        // a unit that panicked has already been rolled back by `Drop`,
        // so the state behind a poisoned lock is consistent
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let mut session = InMemorySession::begin(&mut state);
        let result = work(&mut session);
        if result.is_ok() {
            session.commit();
        }
        result
    }
}

/// Open unit of work over [`InMemoryStorage`]. Keeps just enough to undo itself.
struct InMemorySession<'s> {
    state: &'s mut State,
    entries_len: usize,
    previous_accounts: HashMap<AccountNumber, Option<Account>>,
    previous_entries: HashMap<usize, Transaction>,
    committed: bool,
}

impl<'s> InMemorySession<'s> {
    fn begin(state: &'s mut State) -> Self {
        let entries_len = state.entries.len();
        Self {
            state,
            entries_len,
            previous_accounts: HashMap::new(),
            previous_entries: HashMap::new(),
            committed: false,
        }
    }

    fn commit(mut self) {
        self.committed = true;
    }

    fn rollback(&mut self) {
        for (account_number, previous) in self.previous_accounts.drain() {
            match previous {
                Some(account) => {
                    self.state.accounts.insert(account_number, account);
                }
                None => {
                    self.state.accounts.remove(&account_number);
                }
            }
        }
        self.state.entries.truncate(self.entries_len);
        for (index, previous) in self.previous_entries.drain() {
            self.state.entries[index] = previous;
        }
    }
}

impl Drop for InMemorySession<'_> {
    fn drop(&mut self) {
        if !self.committed {
            self.rollback();
        }
    }
}

impl AccountStore for InMemorySession<'_> {
    fn find_by_number(&self, account_number: &str) -> Result<Option<Account>, StorageError> {
        Ok(self.state.accounts.get(account_number).cloned())
    }

    fn save_account(&mut self, account: Account) -> Result<Account, StorageError> {
        let account_number = account.account_number().to_owned();
        if !self.previous_accounts.contains_key(&account_number) {
            let previous = self.state.accounts.get(&account_number).cloned();
            self.previous_accounts.insert(account_number.clone(), previous);
        }
        self.state.accounts.insert(account_number, account.clone());
        Ok(account)
    }

    fn find_all(&self) -> Result<Vec<Account>, StorageError> {
        Ok(self.state.accounts.values().cloned().collect())
    }
}

impl LedgerStore for InMemorySession<'_> {
    fn save_entry(&mut self, mut entry: Transaction) -> Result<Transaction, StorageError> {
        let Some(id) = entry.id else {
            entry.id = Some(self.state.entries.len() as EntryId + 1);
            self.state.entries.push(entry.clone());
            return Ok(entry);
        };

        let index = usize::try_from(id)
            .ok()
            .and_then(|id| id.checked_sub(1))
            .filter(|index| {
                self.state
                    .entries
                    .get(*index)
                    .is_some_and(|stored| stored.id == Some(id))
            })
            .ok_or(StorageError::EntryNotFound { id })?;

        // entries appended by this unit go away with the truncate on rollback
        if index < self.entries_len && !self.previous_entries.contains_key(&index) {
            self.previous_entries
                .insert(index, self.state.entries[index].clone());
        }
        self.state.entries[index] = entry.clone();
        Ok(entry)
    }

    fn find_by_account(&self, account_number: &str) -> Result<Vec<Transaction>, StorageError> {
        Ok(self
            .state
            .entries
            .iter()
            .filter(|entry| entry.account_number == account_number)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rust_decimal_macros::dec;

    use super::*;

    fn entry(from: &Account, to: &Account) -> Transaction {
        Transaction::withdrawal(from, to, dec!(1), Utc::now())
    }

    #[test]
    fn committed_unit_is_visible() {
        let storage = InMemoryStorage::new();
        let a = Account::new("1", dec!(10));
        let b = Account::new("2", dec!(20));

        let saved = storage
            .atomically(|session| -> Result<_, StorageError> {
                session.save_account(a.clone())?;
                session.save_account(b.clone())?;
                session.save_entry(entry(&a, &b))
            })
            .unwrap();
        assert_eq!(saved.id, Some(1));

        let (accounts, entries) = storage
            .atomically(|session| -> Result<_, StorageError> {
                Ok((session.find_all()?, session.find_by_account("1")?))
            })
            .unwrap();
        assert_eq!(accounts, vec![a, b]);
        assert_eq!(entries, vec![saved]);
    }

    #[test]
    fn failed_unit_is_rolled_back() {
        let storage = InMemoryStorage::new();
        let a = Account::new("1", dec!(10));
        let b = Account::new("2", dec!(20));
        storage
            .atomically(|session| -> Result<_, StorageError> {
                session.save_account(a.clone())?;
                session.save_entry(entry(&a, &b))
            })
            .unwrap();

        let err = storage
            .atomically(|session| -> Result<(), StorageError> {
                session.save_account(Account::new("1", dec!(0)))?;
                session.save_account(b.clone())?;
                let mut first = session.find_by_account("1")?.remove(0);
                first.description = "rewritten".to_owned();
                session.save_entry(first)?;
                session.save_entry(entry(&b, &a))?;
                Err(StorageError::Backend("disk on fire".to_owned()))
            })
            .unwrap_err();
        assert_eq!(err, StorageError::Backend("disk on fire".to_owned()));

        storage
            .atomically(|session| -> Result<(), StorageError> {
                assert_eq!(session.find_all()?, vec![a.clone()]);
                let entries = session.find_by_account("1")?;
                assert_eq!(entries.len(), 1);
                assert_eq!(entries[0].description, "Credited to account no 2");
                assert!(session.find_by_account("2")?.is_empty());
                // ids continue where the last committed unit stopped
                assert_eq!(session.save_entry(entry(&a, &b))?.id, Some(2));
                Err(StorageError::Backend("undo".to_owned()))
            })
            .unwrap_err();
    }

    #[test]
    fn update_of_unknown_entry_fails() {
        let storage = InMemoryStorage::new();
        let a = Account::new("1", dec!(10));
        let b = Account::new("2", dec!(20));
        let mut orphan = entry(&a, &b);
        orphan.id = Some(42);

        let err = storage
            .atomically(|session| session.save_entry(orphan))
            .unwrap_err();
        assert_eq!(err, StorageError::EntryNotFound { id: 42 });
    }

    #[test]
    fn panicking_unit_leaves_no_trace() {
        let storage = InMemoryStorage::new();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _ = storage.atomically(|session| -> Result<(), StorageError> {
                session.save_account(Account::new("1", dec!(10)))?;
                panic!("boom");
            });
        }));
        assert!(result.is_err());

        let accounts = storage
            .atomically(|session| session.find_all())
            .unwrap();
        assert!(accounts.is_empty());
    }
}

use std::sync::{Mutex, PoisonError};

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::{
    account::Account,
    statement::{AccountStatement, build_statement},
    store::{Session, Storage, StorageError, in_memory::InMemoryStorage},
    transaction::Transaction,
    validator::{validate_create, validate_transfer},
};

use super::{Bank, BankError, TransferRequest};

/// Runs transfers one at a time, process-wide.
///
/// Transfers between unrelated accounts still wait for each other. Reads and
/// account creation skip the transfer guard and rely on the storage unit of
/// work to never see a half-applied transfer.
#[derive(Debug, Default)]
pub struct TransferEngine<S = InMemoryStorage> {
    storage: S,
    transfer_guard: Mutex<()>,
}

impl<S: Storage> TransferEngine<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            transfer_guard: Mutex::new(()),
        }
    }
}

impl<S: Storage> Bank for TransferEngine<S> {
    fn create_account(&self, account: Account) -> Result<Account, BankError> {
        let result = self
            .storage
            .atomically(|session| -> Result<Account, BankError> {
                let existing = session.find_by_number(account.account_number())?;
                validate_create(existing.as_ref(), &account)?;
                let account_number = account.account_number().to_owned();
                session.save_account(account)?;
                // hand back what the store holds, not what we were given
                Ok(session
                    .find_by_number(&account_number)?
                    .ok_or(StorageError::AccountNotPersisted { account_number })?)
            });
        match &result {
            Ok(account) => info!(
                account = account.account_number(),
                balance = %account.current_balance(),
                "account created"
            ),
            Err(err) => warn!(%err, "account rejected"),
        }
        result
    }

    fn transfer(&self, request: &TransferRequest) -> Result<Transaction, BankError> {
        // the guard holds no data, a panic elsewhere leaves nothing to repair
        let _guard = self
            .transfer_guard
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let result = self
            .storage
            .atomically(|session| -> Result<Transaction, BankError> {
                let from = session.find_by_number(&request.from_account_number)?;
                let to = session.find_by_number(&request.to_account_number)?;
                let (mut from, mut to) = validate_transfer(request, from, to)?;

                from.withdraw(request.amount)?;
                let from = session.save_account(from)?;
                to.deposit(request.amount)?;
                let to = session.save_account(to)?;

                Ok(record_entries(session, &from, &to, request.amount)?)
            });
        match &result {
            Ok(entry) => info!(
                from = %request.from_account_number,
                to = %request.to_account_number,
                amount = %request.amount,
                transaction_id = entry.transaction_id,
                "transfer committed"
            ),
            Err(err) => warn!(
                from = %request.from_account_number,
                to = %request.to_account_number,
                amount = %request.amount,
                %err,
                "transfer rejected"
            ),
        }
        result
    }

    fn statement(&self, account_number: &str) -> Result<AccountStatement, BankError> {
        debug!(account = account_number, "building statement");
        self.storage
            .atomically(|session| build_statement(&*session, account_number))
    }

    fn accounts(&self) -> Result<Vec<Account>, BankError> {
        self.storage
            .atomically(|session| -> Result<_, BankError> { Ok(session.find_all()?) })
    }
}

/// Writes both legs of a transfer. The OUT leg's storage id becomes the
/// transaction id of both legs.
fn record_entries(
    session: &mut dyn Session,
    from: &Account,
    to: &Account,
    amount: Decimal,
) -> Result<Transaction, StorageError> {
    let at = Utc::now();
    let mut withdrawal = session.save_entry(Transaction::withdrawal(from, to, amount, at))?;
    withdrawal.transaction_id = withdrawal.id;
    let withdrawal = session.save_entry(withdrawal)?;
    session.save_entry(Transaction::deposit(
        from,
        to,
        amount,
        withdrawal.transaction_id,
        at,
    ))?;
    Ok(withdrawal)
}

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::account::{Account, AccountNumber};

/// Identifier assigned by the ledger store to each persisted entry.
pub type EntryId = u64;

/// Identifier shared by both legs of one transfer. It is the entry id of the
/// withdrawal leg.
pub type TransactionId = EntryId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Out,
    In,
}

/// One leg of a transfer, owned by `account_number`.
///
/// `id` and `transaction_id` stay `None` until the entry is persisted; every
/// committed entry has both set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub id: Option<EntryId>,
    pub transaction_id: Option<TransactionId>,
    pub account_number: AccountNumber,
    pub sender_account_number: AccountNumber,
    pub receiver_account_number: AccountNumber,
    pub transaction_amount: Decimal,
    pub direction: Direction,
    pub description: String,
    pub transaction_date_time: DateTime<Utc>,
}

impl Transaction {
    /// OUT leg, owned by the paying account.
    pub fn withdrawal(from: &Account, to: &Account, amount: Decimal, at: DateTime<Utc>) -> Self {
        Self {
            id: None,
            transaction_id: None,
            account_number: from.account_number().to_owned(),
            sender_account_number: from.account_number().to_owned(),
            receiver_account_number: to.account_number().to_owned(),
            transaction_amount: amount,
            direction: Direction::Out,
            description: format!("Credited to account no {}", to.account_number()),
            transaction_date_time: at,
        }
    }

    /// IN leg, owned by the receiving account and linked to its OUT leg.
    pub fn deposit(
        from: &Account,
        to: &Account,
        amount: Decimal,
        transaction_id: Option<TransactionId>,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: None,
            transaction_id,
            account_number: to.account_number().to_owned(),
            sender_account_number: from.account_number().to_owned(),
            receiver_account_number: to.account_number().to_owned(),
            transaction_amount: amount,
            direction: Direction::In,
            description: format!("Credited from account no {}", from.account_number()),
            transaction_date_time: at,
        }
    }
}

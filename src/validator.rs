use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    account::{Account, AccountNumber},
    processor::TransferRequest,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Account '{account_number}' already exists")]
    DuplicateAccount { account_number: AccountNumber },
    #[error("Can not create account '{account_number}' with a negative balance ({balance})")]
    NegativeInitialBalance {
        account_number: AccountNumber,
        balance: Decimal,
    },
    #[error("Transfer amount needs to be more than 0 (got {amount})")]
    NonPositiveAmount { amount: Decimal },
    #[error("From Account Number '{account_number}' not found")]
    SourceAccountNotFound { account_number: AccountNumber },
    #[error("To Account Number '{account_number}' not found")]
    DestinationAccountNotFound { account_number: AccountNumber },
    #[error("Account '{account_number}' cannot send money to itself")]
    SelfTransfer { account_number: AccountNumber },
    #[error(
        "The balance in the account number '{account_number}' is not enough (current balance: {current_balance})"
    )]
    InsufficientFunds {
        account_number: AccountNumber,
        current_balance: Decimal,
        amount: Decimal,
    },
    #[error(
        "The balance in the account number '{account_number}' cannot hold {amount} more (current balance: {current_balance})"
    )]
    BalanceOverflow {
        account_number: AccountNumber,
        current_balance: Decimal,
        amount: Decimal,
    },
}

/// `existing` is whatever the store holds under the new account's number.
pub fn validate_create(existing: Option<&Account>, account: &Account) -> Result<(), ValidationError> {
    if existing.is_some() {
        return Err(ValidationError::DuplicateAccount {
            account_number: account.account_number().to_owned(),
        });
    }
    if account.current_balance() < Decimal::ZERO {
        return Err(ValidationError::NegativeInitialBalance {
            account_number: account.account_number().to_owned(),
            balance: account.current_balance(),
        });
    }
    Ok(())
}

/// Checks run in a fixed order, the first failure wins. On success the
/// resolved `(from, to)` pair is handed back.
pub fn validate_transfer(
    request: &TransferRequest,
    from: Option<Account>,
    to: Option<Account>,
) -> Result<(Account, Account), ValidationError> {
    if request.amount <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveAmount {
            amount: request.amount,
        });
    }
    let Some(from) = from else {
        return Err(ValidationError::SourceAccountNotFound {
            account_number: request.from_account_number.clone(),
        });
    };
    let Some(to) = to else {
        return Err(ValidationError::DestinationAccountNotFound {
            account_number: request.to_account_number.clone(),
        });
    };
    if from.account_number() == to.account_number() {
        return Err(ValidationError::SelfTransfer {
            account_number: from.account_number().to_owned(),
        });
    }
    Ok((from, to))
}

/// Returns the balance left after the withdrawal. Ending at exactly zero is allowed.
pub fn validate_withdrawal(account: &Account, amount: Decimal) -> Result<Decimal, ValidationError> {
    // falling below Decimal::MIN is as insufficient as going negative
    match account.current_balance().checked_sub(amount) {
        Some(new_balance) if new_balance >= Decimal::ZERO => Ok(new_balance),
        _ => Err(ValidationError::InsufficientFunds {
            account_number: account.account_number().to_owned(),
            current_balance: account.current_balance(),
            amount,
        }),
    }
}

/// Returns the balance after the deposit, or an error when it no longer fits a `Decimal`.
pub fn validate_deposit(account: &Account, amount: Decimal) -> Result<Decimal, ValidationError> {
    account
        .current_balance()
        .checked_add(amount)
        .ok_or_else(|| ValidationError::BalanceOverflow {
            account_number: account.account_number().to_owned(),
            current_balance: account.current_balance(),
            amount,
        })
}

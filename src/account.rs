use rust_decimal::Decimal;

use crate::validator::{ValidationError, validate_deposit, validate_withdrawal};

pub type AccountNumber = String;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    account_number: AccountNumber,
    current_balance: Decimal,
}

impl Account {
    pub fn new(account_number: impl Into<AccountNumber>, current_balance: Decimal) -> Self {
        Self {
            account_number: account_number.into(),
            current_balance,
        }
    }

    pub fn account_number(&self) -> &str {
        &self.account_number
    }

    pub fn current_balance(&self) -> Decimal {
        self.current_balance
    }

    /// Takes `amount` out of the balance, leaving the account untouched when
    /// the result would go below zero.
    pub(crate) fn withdraw(&mut self, amount: Decimal) -> Result<(), ValidationError> {
        self.current_balance = validate_withdrawal(self, amount)?;
        Ok(())
    }

    pub(crate) fn deposit(&mut self, amount: Decimal) -> Result<(), ValidationError> {
        self.current_balance = validate_deposit(self, amount)?;
        Ok(())
    }
}

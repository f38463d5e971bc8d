use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    account::{Account, AccountNumber},
    processor::TransferRequest,
};

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CommandKind {
    Create,
    Transfer,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Amount is required for {kind:?}")]
    AmountRequired { kind: CommandKind },
    #[error("Counterparty account is required for {kind:?}")]
    CounterpartyRequired { kind: CommandKind },
    #[error("Counterparty account is not expected for {kind:?}")]
    UnexpectedCounterparty { kind: CommandKind },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BankCommand {
    CreateAccount(Account),
    Transfer(TransferRequest),
}

impl BankCommand {
    /// Only checks that the row has the fields its kind needs. Business rules
    /// are left to the engine.
    pub fn parse_command(
        kind: CommandKind,
        account: AccountNumber,
        counterparty: Option<AccountNumber>,
        amount: Option<Decimal>,
    ) -> Result<Self, CommandError> {
        let Some(amount) = amount else {
            return Err(CommandError::AmountRequired { kind });
        };
        match (kind, counterparty) {
            (CommandKind::Create, None) => Ok(Self::CreateAccount(Account::new(account, amount))),
            (CommandKind::Create, Some(_)) => Err(CommandError::UnexpectedCounterparty { kind }),
            (CommandKind::Transfer, Some(to)) => {
                Ok(Self::Transfer(TransferRequest::new(account, to, amount)))
            }
            (CommandKind::Transfer, None) => Err(CommandError::CounterpartyRequired { kind }),
        }
    }
}

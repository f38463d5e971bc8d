/// Account balances and the only two ways they change.
pub mod account;

/// Ledger entries: the two linked legs written for every transfer.
pub mod transaction;

/// Pure precondition checks for account creation and transfers.
pub mod validator;

/// Read-only projection of an account's balance and history.
pub mod statement;

/// Account and ledger storage seen through atomic units of work, plus an
/// in-memory implementation.
pub mod store;

/// Caller-facing operations and the transfer engine behind them.
///
/// Transfers are serialized by a single engine-wide guard and applied to
/// storage as one unit of work.
pub mod processor;

/// Turns loosely typed script rows into engine commands.
pub mod command;

/// Bootstraps the engine for the binary: CSV script in, account summary out.
/// Lives in the library so the integration test can drive it.
pub mod bin_utils;

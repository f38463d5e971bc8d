use std::collections::HashMap;

use bank_ledger::{
    account::Account,
    processor::{Bank, TransferRequest, transfer_engine::TransferEngine},
    transaction::Direction,
};
use proptest::prelude::*;
use rust_decimal::Decimal;

const ACCOUNTS: [&str; 3] = ["a", "b", "c"];

fn transfer_strategy() -> impl Strategy<Value = (usize, usize, i64)> {
    (0..ACCOUNTS.len(), 0..ACCOUNTS.len(), -50i64..400)
}

proptest! {
    #[test]
    fn balances_stay_non_negative_and_conserved(
        opening in prop::collection::vec(0i64..1000, ACCOUNTS.len()),
        transfers in prop::collection::vec(transfer_strategy(), 1..40),
    ) {
        let engine: TransferEngine = TransferEngine::default();
        for (number, balance) in ACCOUNTS.iter().zip(&opening) {
            engine.create_account(Account::new(*number, Decimal::from(*balance))).unwrap();
        }
        let total_before: Decimal = opening.iter().copied().map(Decimal::from).sum();

        let mut committed = 0;
        for (from, to, amount) in transfers {
            let balances: HashMap<_, _> = engine
                .accounts()
                .unwrap()
                .into_iter()
                .map(|acc| (acc.account_number().to_owned(), acc.current_balance()))
                .collect();
            let amount = Decimal::from(amount);
            let request = TransferRequest::new(ACCOUNTS[from], ACCOUNTS[to], amount);

            match engine.transfer(&request) {
                Ok(_) => {
                    committed += 1;
                    prop_assert_eq!(
                        engine.statement(ACCOUNTS[from]).unwrap().current_balance,
                        balances[ACCOUNTS[from]] - amount
                    );
                    prop_assert_eq!(
                        engine.statement(ACCOUNTS[to]).unwrap().current_balance,
                        balances[ACCOUNTS[to]] + amount
                    );
                }
                Err(_) => {
                    for number in ACCOUNTS {
                        prop_assert_eq!(
                            engine.statement(number).unwrap().current_balance,
                            balances[number]
                        );
                    }
                }
            }
        }

        let accounts = engine.accounts().unwrap();
        prop_assert!(accounts.iter().all(|acc| acc.current_balance() >= Decimal::ZERO));
        let total_after: Decimal = accounts.iter().map(Account::current_balance).sum();
        prop_assert_eq!(total_before, total_after);

        let entries: Vec<_> = ACCOUNTS
            .iter()
            .flat_map(|number| engine.statement(number).unwrap().transactions)
            .collect();
        prop_assert_eq!(entries.len(), 2 * committed);
    }

    #[test]
    fn every_transfer_has_one_out_and_one_in_leg(
        amounts in prop::collection::vec(1i64..100, 1..20),
    ) {
        let engine: TransferEngine = TransferEngine::default();
        engine.create_account(Account::new("a", Decimal::from(10_000))).unwrap();
        engine.create_account(Account::new("b", Decimal::ZERO)).unwrap();

        for amount in &amounts {
            engine.transfer(&TransferRequest::new("a", "b", Decimal::from(*amount))).unwrap();
        }

        let outs = engine.statement("a").unwrap().transactions;
        let ins = engine.statement("b").unwrap().transactions;
        prop_assert_eq!(outs.len(), amounts.len());
        prop_assert_eq!(ins.len(), amounts.len());

        for ((out, inc), amount) in outs.iter().zip(&ins).zip(&amounts) {
            prop_assert_eq!(out.direction, Direction::Out);
            prop_assert_eq!(inc.direction, Direction::In);
            prop_assert!(out.transaction_id.is_some());
            prop_assert_eq!(out.transaction_id, inc.transaction_id);
            prop_assert_eq!(out.transaction_amount, Decimal::from(*amount));
            prop_assert_eq!(inc.transaction_amount, Decimal::from(*amount));
        }
    }
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use pocketledger::ledger::Ledger;
use pocketledger::models::{AccountKind, LoanKind, Recurrence, TxKind};
use pocketledger::store::MemoryStore;
use rust_decimal::Decimal;
use uuid::Uuid;

fn open() -> Ledger {
    Ledger::open(Box::new(MemoryStore::new())).unwrap()
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn dec(n: i64) -> Decimal {
    Decimal::from(n)
}

#[test]
fn first_open_seeds_default_accounts() {
    let ledger = open();
    let accounts = ledger.accounts();
    assert_eq!(accounts.len(), 2);
    assert_eq!(accounts[0].kind, AccountKind::Bank);
    assert_eq!(accounts[1].kind, AccountKind::Fampay);
    assert!(accounts.iter().all(|a| a.balance == Decimal::ZERO));
    assert_eq!(accounts[0].parent_id, None);
    assert_eq!(accounts[1].parent_id, Some(accounts[0].id));
}

#[test]
fn add_transaction_applies_signed_delta() {
    let mut ledger = open();
    let bank = ledger.accounts()[0].id;

    ledger
        .add_transaction(
            bank,
            TxKind::Income,
            dec(500),
            "Salary",
            "August pay",
            day(2025, 8, 1),
            "09:00",
        )
        .unwrap();
    assert_eq!(ledger.accounts()[0].balance, dec(500));

    ledger
        .add_transaction(
            bank,
            TxKind::Expense,
            dec(200),
            "Food & Dining",
            "",
            day(2025, 8, 2),
            "13:30",
        )
        .unwrap();
    assert_eq!(ledger.accounts()[0].balance, dec(300));
}

#[test]
fn transactions_are_newest_first() {
    let mut ledger = open();
    let bank = ledger.accounts()[0].id;
    let first = ledger
        .add_transaction(bank, TxKind::Expense, dec(10), "A", "", day(2025, 8, 1), "10:00")
        .unwrap();
    let second = ledger
        .add_transaction(bank, TxKind::Expense, dec(20), "B", "", day(2025, 8, 2), "10:00")
        .unwrap();
    let ids: Vec<Uuid> = ledger.transactions().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);
}

#[test]
fn delete_transaction_is_exact_inverse_of_add() {
    let mut ledger = open();
    let bank = ledger.accounts()[0].id;
    ledger
        .add_transaction(bank, TxKind::Income, dec(1000), "Salary", "", day(2025, 8, 1), "09:00")
        .unwrap();
    let before = ledger.accounts()[0].balance;

    let tx = ledger
        .add_transaction(bank, TxKind::Expense, dec(350), "Shopping", "", day(2025, 8, 3), "17:00")
        .unwrap();
    assert_eq!(ledger.accounts()[0].balance, before - dec(350));

    ledger.delete_transaction(tx.id).unwrap();
    assert_eq!(ledger.accounts()[0].balance, before);
    assert_eq!(ledger.transactions().len(), 1);
}

#[test]
fn balance_matches_signed_sum_across_interleaved_mutations() {
    let mut ledger = open();
    let bank = ledger.accounts()[0].id;
    let fampay = ledger.accounts()[1].id;

    let check = |ledger: &Ledger| {
        for acc in ledger.accounts() {
            let sum: Decimal = ledger
                .transactions()
                .iter()
                .filter(|t| t.account_id == acc.id)
                .map(|t| t.signed_amount())
                .sum();
            assert_eq!(acc.balance, sum, "invariant broken for {}", acc.name);
        }
    };

    let t1 = ledger
        .add_transaction(bank, TxKind::Income, dec(900), "Salary", "", day(2025, 8, 1), "09:00")
        .unwrap();
    check(&ledger);
    let t2 = ledger
        .add_transaction(fampay, TxKind::Expense, dec(40), "Food & Dining", "", day(2025, 8, 2), "12:00")
        .unwrap();
    check(&ledger);
    ledger.delete_transaction(t1.id).unwrap();
    check(&ledger);
    ledger
        .add_transaction(bank, TxKind::Expense, dec(75), "Transportation", "", day(2025, 8, 3), "08:15")
        .unwrap();
    check(&ledger);
    ledger.delete_transaction(t2.id).unwrap();
    check(&ledger);
}

#[test]
fn delete_unknown_transaction_is_noop() {
    let mut ledger = open();
    let bank = ledger.accounts()[0].id;
    ledger
        .add_transaction(bank, TxKind::Income, dec(100), "Gift", "", day(2025, 8, 1), "10:00")
        .unwrap();
    ledger.delete_transaction(Uuid::new_v4()).unwrap();
    assert_eq!(ledger.transactions().len(), 1);
    assert_eq!(ledger.accounts()[0].balance, dec(100));
}

#[test]
fn unknown_account_records_transaction_without_balance_change() {
    let mut ledger = open();
    let ghost = Uuid::new_v4();
    ledger
        .add_transaction(ghost, TxKind::Expense, dec(60), "Other", "", day(2025, 8, 4), "11:00")
        .unwrap();
    assert_eq!(ledger.transactions().len(), 1);
    assert!(ledger.accounts().iter().all(|a| a.balance == Decimal::ZERO));
}

#[test]
fn set_budget_upserts_on_month_and_preserves_alert() {
    let mut ledger = open();
    ledger.set_budget("2025-08", dec(5000)).unwrap();
    ledger.mark_budget_alert_shown("2025-08").unwrap();
    let first_id = ledger.budgets()[0].id;

    ledger.set_budget("2025-08", dec(7000)).unwrap();
    assert_eq!(ledger.budgets().len(), 1);
    let b = &ledger.budgets()[0];
    assert_eq!(b.id, first_id);
    assert_eq!(b.limit, dec(7000));
    assert!(b.alert_shown);
}

#[test]
fn new_budget_starts_without_alert() {
    let mut ledger = open();
    let b = ledger.set_budget("2025-09", dec(3000)).unwrap();
    assert!(!b.alert_shown);
}

#[test]
fn mark_alert_for_unknown_month_is_noop() {
    let mut ledger = open();
    ledger.mark_budget_alert_shown("2031-01").unwrap();
    assert!(ledger.budgets().is_empty());
}

#[test]
fn loan_toggle_and_delete() {
    let mut ledger = open();
    let loan = ledger
        .add_loan(LoanKind::Given, "Ravi", dec(250), "lunch", day(2025, 8, 5))
        .unwrap();
    assert!(!loan.is_settled);

    ledger.toggle_loan_settled(loan.id).unwrap();
    assert!(ledger.loans()[0].is_settled);
    ledger.toggle_loan_settled(loan.id).unwrap();
    assert!(!ledger.loans()[0].is_settled);

    ledger.delete_loan(loan.id).unwrap();
    assert!(ledger.loans().is_empty());
    // Loans never touch balances
    assert!(ledger.accounts().iter().all(|a| a.balance == Decimal::ZERO));
}

#[test]
fn toggle_unknown_loan_is_noop() {
    let mut ledger = open();
    ledger.toggle_loan_settled(Uuid::new_v4()).unwrap();
    assert!(ledger.loans().is_empty());
}

#[test]
fn custom_reminder_requires_interval() {
    let mut ledger = open();
    assert!(
        ledger
            .add_reminder("Netflix", dec(199), day(2025, 9, 1), Recurrence::Custom, None)
            .is_err()
    );
    assert!(
        ledger
            .add_reminder("Rent", dec(8000), day(2025, 9, 1), Recurrence::Monthly, Some(10))
            .is_err()
    );
    assert!(ledger.reminders().is_empty());

    let r = ledger
        .add_reminder("Gym", dec(500), day(2025, 9, 2), Recurrence::Custom, Some(45))
        .unwrap();
    assert_eq!(r.custom_days, Some(45));
    assert!(r.is_active);
}

#[test]
fn reminder_toggle_and_delete() {
    let mut ledger = open();
    let r = ledger
        .add_reminder("Rent", dec(8000), day(2025, 9, 1), Recurrence::Monthly, None)
        .unwrap();
    ledger.toggle_reminder_active(r.id).unwrap();
    assert!(!ledger.reminders()[0].is_active);
    ledger.delete_reminder(r.id).unwrap();
    assert!(ledger.reminders().is_empty());
}

#[test]
fn manual_balance_override_then_prospective_invariant() {
    let mut ledger = open();
    let bank = ledger.accounts()[0].id;
    ledger
        .add_transaction(bank, TxKind::Income, dec(100), "Salary", "", day(2025, 8, 1), "09:00")
        .unwrap();

    // Reconcile against a statement; past transactions no longer sum up.
    ledger.update_account_balance(bank, dec(1000)).unwrap();
    assert_eq!(ledger.accounts()[0].balance, dec(1000));

    ledger
        .add_transaction(bank, TxKind::Expense, dec(50), "Food & Dining", "", day(2025, 8, 2), "12:00")
        .unwrap();
    assert_eq!(ledger.accounts()[0].balance, dec(950));
}

#[test]
fn update_balance_for_unknown_account_is_noop() {
    let mut ledger = open();
    ledger.update_account_balance(Uuid::new_v4(), dec(999)).unwrap();
    assert!(ledger.accounts().iter().all(|a| a.balance == Decimal::ZERO));
}

#[test]
fn current_month_queries() {
    let mut ledger = open();
    let bank = ledger.accounts()[0].id;
    let today = day(2025, 8, 15);

    ledger
        .add_transaction(bank, TxKind::Expense, dec(100), "Food & Dining", "", day(2025, 8, 10), "12:00")
        .unwrap();
    ledger
        .add_transaction(bank, TxKind::Income, dec(500), "Salary", "", day(2025, 8, 1), "09:00")
        .unwrap();
    ledger
        .add_transaction(bank, TxKind::Expense, dec(50), "Shopping", "", day(2025, 7, 28), "18:00")
        .unwrap();

    assert_eq!(ledger.current_month_expenses(today), dec(100));
    assert_eq!(ledger.daily_spending(day(2025, 8, 10)), dec(100));
    assert_eq!(ledger.daily_spending(day(2025, 8, 11)), Decimal::ZERO);

    assert!(ledger.current_budget(today).is_none());
    ledger.set_budget("2025-08", dec(4000)).unwrap();
    assert_eq!(ledger.current_budget(today).unwrap().month, "2025-08");
}

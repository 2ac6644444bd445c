// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use pocketledger::ledger::{ACCOUNTS_KEY, Ledger, TRANSACTIONS_KEY};
use pocketledger::models::{LoanKind, Recurrence, TxKind};
use pocketledger::store::{JsonFileStore, MemoryStore, Store, load_or};
use rust_decimal::Decimal;
use std::fs;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn dec(n: i64) -> Decimal {
    Decimal::from(n)
}

#[test]
fn load_or_returns_default_for_missing_slot() {
    let store = MemoryStore::new();
    let v: Vec<i32> = load_or(&store, "no-such-slot", vec![7]);
    assert_eq!(v, vec![7]);
}

#[test]
fn load_or_recovers_from_corrupt_slot() {
    let mut store = MemoryStore::new();
    store.save_raw("slot", "{not json at all").unwrap();
    let v: Vec<i32> = load_or(&store, "slot", Vec::new());
    assert!(v.is_empty());
}

#[test]
fn slots_are_one_json_file_per_key() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = JsonFileStore::open_at(dir.path()).unwrap();
    store.save_raw("finance-loans", "[]").unwrap();
    assert!(dir.path().join("finance-loans.json").exists());
    assert_eq!(store.load_raw("finance-loans").unwrap(), "[]");
}

#[test]
fn ledger_round_trips_across_reopen() {
    let dir = tempfile::tempdir().unwrap();

    let (bank_id, tx_id) = {
        let store = JsonFileStore::open_at(dir.path()).unwrap();
        let mut ledger = Ledger::open(Box::new(store)).unwrap();
        let bank = ledger.accounts()[0].id;
        let tx = ledger
            .add_transaction(
                bank,
                TxKind::Expense,
                dec(120),
                "Food & Dining",
                "thali",
                day(2025, 8, 14),
                "13:05",
            )
            .unwrap();
        ledger
            .add_loan(LoanKind::Taken, "Asha", dec(2000), "", day(2025, 8, 10))
            .unwrap();
        ledger.set_budget("2025-08", dec(6000)).unwrap();
        ledger
            .add_reminder("Rent", dec(8000), day(2025, 9, 1), Recurrence::Monthly, None)
            .unwrap();
        (bank, tx.id)
    };

    let store = JsonFileStore::open_at(dir.path()).unwrap();
    let ledger = Ledger::open(Box::new(store)).unwrap();
    assert_eq!(ledger.accounts()[0].id, bank_id);
    assert_eq!(ledger.accounts()[0].balance, dec(-120));
    assert_eq!(ledger.transactions().len(), 1);
    assert_eq!(ledger.transactions()[0].id, tx_id);
    assert_eq!(ledger.transactions()[0].time, "13:05");
    assert_eq!(ledger.loans().len(), 1);
    assert_eq!(ledger.loans()[0].person_name, "Asha");
    assert_eq!(ledger.budgets().len(), 1);
    assert_eq!(ledger.reminders().len(), 1);
}

#[test]
fn corrupt_transactions_slot_falls_back_to_empty() {
    let dir = tempfile::tempdir().unwrap();
    {
        let store = JsonFileStore::open_at(dir.path()).unwrap();
        let mut ledger = Ledger::open(Box::new(store)).unwrap();
        let bank = ledger.accounts()[0].id;
        ledger
            .add_transaction(bank, TxKind::Income, dec(100), "Gift", "", day(2025, 8, 1), "10:00")
            .unwrap();
    }
    fs::write(
        dir.path().join(format!("{}.json", TRANSACTIONS_KEY)),
        "garbage",
    )
    .unwrap();

    let store = JsonFileStore::open_at(dir.path()).unwrap();
    let ledger = Ledger::open(Box::new(store)).unwrap();
    assert!(ledger.transactions().is_empty());
    // Other slots are untouched by the recovery
    assert_eq!(ledger.accounts().len(), 2);
}

#[test]
fn corrupt_accounts_slot_reseeds_defaults() {
    let dir = tempfile::tempdir().unwrap();
    {
        let store = JsonFileStore::open_at(dir.path()).unwrap();
        Ledger::open(Box::new(store)).unwrap();
    }
    fs::write(dir.path().join(format!("{}.json", ACCOUNTS_KEY)), "[oops").unwrap();

    let reseeded = {
        let store = JsonFileStore::open_at(dir.path()).unwrap();
        let ledger = Ledger::open(Box::new(store)).unwrap();
        assert_eq!(ledger.accounts().len(), 2);
        ledger.accounts()[0].id
    };

    // The reseeded slot was persisted and is stable from now on
    let store = JsonFileStore::open_at(dir.path()).unwrap();
    let ledger = Ledger::open(Box::new(store)).unwrap();
    assert_eq!(ledger.accounts()[0].id, reseeded);
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::Ledger;
use crate::models::{EXPENSE_CATEGORIES, INCOME_CATEGORIES, Recurrence, TxKind};
use crate::utils::pretty_table;
use anyhow::Result;
use rust_decimal::Decimal;
use std::collections::HashSet;

pub fn handle(ledger: &Ledger) -> Result<()> {
    let mut rows = Vec::new();

    // 1) Balance drift: balance disagrees with the signed transaction sum.
    //    Seeded accounts start at zero, so drift means a manual correction
    //    (or hand-edited slot data).
    for acc in ledger.accounts() {
        let sum: Decimal = ledger
            .transactions()
            .iter()
            .filter(|t| t.account_id == acc.id)
            .map(|t| t.signed_amount())
            .sum();
        if acc.balance != sum {
            rows.push(vec![
                "balance_drift".into(),
                format!(
                    "{}: balance {}, transactions sum {}",
                    acc.name,
                    acc.balance.round_dp(2),
                    sum.round_dp(2)
                ),
            ]);
        }
    }

    // 2) Transactions referencing unknown accounts
    let known: HashSet<_> = ledger.accounts().iter().map(|a| a.id).collect();
    for t in ledger.transactions() {
        if !known.contains(&t.account_id) {
            rows.push(vec![
                "orphan_transaction".into(),
                format!("{} {} {}", t.id, t.date, t.amount),
            ]);
        }
    }

    // 3) Custom-recurrence reminders without an interval (slot data can be
    //    hand-edited; the API rejects these at construction)
    for r in ledger.reminders() {
        if r.recurrence == Recurrence::Custom && r.custom_days.is_none() {
            rows.push(vec!["reminder_missing_interval".into(), r.name.clone()]);
        }
    }

    // 4) Categories outside the canonical lists. Free-form input is
    //    accepted everywhere, so this is informational.
    for t in ledger.transactions() {
        let canon = match t.kind {
            TxKind::Expense => EXPENSE_CATEGORIES,
            TxKind::Income => INCOME_CATEGORIES,
        };
        if !canon.contains(&t.category.as_str()) {
            rows.push(vec![
                "unknown_category".into(),
                format!("{} '{}'", t.date, t.category),
            ]);
        }
    }

    // 5) Duplicate budget months
    let mut seen = HashSet::new();
    for b in ledger.budgets() {
        if !seen.insert(b.month.clone()) {
            rows.push(vec!["duplicate_budget_month".into(), b.month.clone()]);
        }
    }

    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}

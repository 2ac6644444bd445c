// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::{
    Account, AccountKind, Budget, Loan, LoanKind, Recurrence, Reminder, Transaction, TxKind,
};
use crate::store::{self, Store};
use crate::utils::month_key;

pub const ACCOUNTS_KEY: &str = "finance-accounts";
pub const TRANSACTIONS_KEY: &str = "finance-transactions";
pub const LOANS_KEY: &str = "finance-loans";
pub const BUDGETS_KEY: &str = "finance-budgets";
pub const REMINDERS_KEY: &str = "finance-reminders";

/// Owner of the five entity collections and the only reader/writer of the
/// backing store. Every mutation updates the in-memory collection and then
/// persists the touched slot(s) before returning; a failed save is surfaced
/// as an `Err` but the in-memory mutation stands, so memory and disk may
/// diverge until the next successful save.
///
/// The core is deliberately permissive: amounts, categories, and account
/// references are not validated here. The one construction-time check is
/// the `custom_days` precondition on custom-recurrence reminders.
pub struct Ledger {
    store: Box<dyn Store>,
    accounts: Vec<Account>,
    transactions: Vec<Transaction>,
    loans: Vec<Loan>,
    budgets: Vec<Budget>,
    reminders: Vec<Reminder>,
}

fn default_accounts() -> Vec<Account> {
    let bank_id = Uuid::new_v4();
    vec![
        Account {
            id: bank_id,
            name: "Bank Account".to_string(),
            kind: AccountKind::Bank,
            balance: Decimal::ZERO,
            parent_id: None,
        },
        Account {
            id: Uuid::new_v4(),
            name: "FamPay".to_string(),
            kind: AccountKind::Fampay,
            balance: Decimal::ZERO,
            parent_id: Some(bank_id),
        },
    ]
}

impl Ledger {
    /// Load all five slots, seeding the two default accounts on first run
    /// (or when the accounts slot is corrupt). Accounts are never created
    /// or deleted by the user, so an empty slot means a fresh store.
    pub fn open(store: Box<dyn Store>) -> Result<Self> {
        let mut ledger = Ledger {
            accounts: store::load_or(store.as_ref(), ACCOUNTS_KEY, Vec::new()),
            transactions: store::load_or(store.as_ref(), TRANSACTIONS_KEY, Vec::new()),
            loans: store::load_or(store.as_ref(), LOANS_KEY, Vec::new()),
            budgets: store::load_or(store.as_ref(), BUDGETS_KEY, Vec::new()),
            reminders: store::load_or(store.as_ref(), REMINDERS_KEY, Vec::new()),
            store,
        };
        if ledger.accounts.is_empty() {
            ledger.accounts = default_accounts();
            ledger.persist_accounts()?;
        }
        Ok(ledger)
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn loans(&self) -> &[Loan] {
        &self.loans
    }

    pub fn budgets(&self) -> &[Budget] {
        &self.budgets
    }

    pub fn reminders(&self) -> &[Reminder] {
        &self.reminders
    }

    pub fn account_by_name(&self, name: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.name == name)
    }

    /// Record a transaction and apply its balance delta to the referenced
    /// account. An unknown `account_id` matches no account: the transaction
    /// is still recorded and no balance changes.
    #[allow(clippy::too_many_arguments)]
    pub fn add_transaction(
        &mut self,
        account_id: Uuid,
        kind: TxKind,
        amount: Decimal,
        category: &str,
        description: &str,
        date: NaiveDate,
        time: &str,
    ) -> Result<Transaction> {
        let tx = Transaction {
            id: Uuid::new_v4(),
            account_id,
            kind,
            amount,
            category: category.to_string(),
            description: description.to_string(),
            date,
            time: time.to_string(),
        };
        // Newest first, enforced at insert time.
        self.transactions.insert(0, tx.clone());
        let delta = tx.signed_amount();
        if let Some(acc) = self.accounts.iter_mut().find(|a| a.id == account_id) {
            acc.balance += delta;
        }
        self.persist_transactions()?;
        self.persist_accounts()?;
        Ok(tx)
    }

    /// Remove a transaction and reverse exactly the balance delta its
    /// insertion applied. No-op when the id is unknown.
    pub fn delete_transaction(&mut self, id: Uuid) -> Result<()> {
        let Some(pos) = self.transactions.iter().position(|t| t.id == id) else {
            return Ok(());
        };
        let tx = self.transactions.remove(pos);
        if let Some(acc) = self.accounts.iter_mut().find(|a| a.id == tx.account_id) {
            acc.balance -= tx.signed_amount();
        }
        self.persist_transactions()?;
        self.persist_accounts()?;
        Ok(())
    }

    pub fn add_loan(
        &mut self,
        kind: LoanKind,
        person_name: &str,
        amount: Decimal,
        description: &str,
        date: NaiveDate,
    ) -> Result<Loan> {
        let loan = Loan {
            id: Uuid::new_v4(),
            kind,
            person_name: person_name.to_string(),
            amount,
            description: description.to_string(),
            date,
            is_settled: false,
        };
        self.loans.insert(0, loan.clone());
        self.persist_loans()?;
        Ok(loan)
    }

    pub fn toggle_loan_settled(&mut self, id: Uuid) -> Result<()> {
        if let Some(loan) = self.loans.iter_mut().find(|l| l.id == id) {
            loan.is_settled = !loan.is_settled;
            self.persist_loans()?;
        }
        Ok(())
    }

    pub fn delete_loan(&mut self, id: Uuid) -> Result<()> {
        let before = self.loans.len();
        self.loans.retain(|l| l.id != id);
        if self.loans.len() != before {
            self.persist_loans()?;
        }
        Ok(())
    }

    /// Upsert keyed on `month`: an existing budget keeps its id and
    /// `alert_shown`, only `limit` is replaced.
    pub fn set_budget(&mut self, month: &str, limit: Decimal) -> Result<Budget> {
        let budget = if let Some(b) = self.budgets.iter_mut().find(|b| b.month == month) {
            b.limit = limit;
            b.clone()
        } else {
            let b = Budget {
                id: Uuid::new_v4(),
                month: month.to_string(),
                limit,
                alert_shown: false,
            };
            self.budgets.push(b.clone());
            b
        };
        self.persist_budgets()?;
        Ok(budget)
    }

    pub fn mark_budget_alert_shown(&mut self, month: &str) -> Result<()> {
        if let Some(b) = self.budgets.iter_mut().find(|b| b.month == month) {
            b.alert_shown = true;
            self.persist_budgets()?;
        }
        Ok(())
    }

    pub fn add_reminder(
        &mut self,
        name: &str,
        amount: Decimal,
        due_date: NaiveDate,
        recurrence: Recurrence,
        custom_days: Option<u32>,
    ) -> Result<Reminder> {
        match recurrence {
            Recurrence::Custom if custom_days.is_none() => {
                anyhow::bail!("Custom recurrence requires a day interval")
            }
            Recurrence::Weekly | Recurrence::Monthly | Recurrence::Yearly
                if custom_days.is_some() =>
            {
                anyhow::bail!("Day interval is only valid with custom recurrence")
            }
            _ => {}
        }
        let reminder = Reminder {
            id: Uuid::new_v4(),
            name: name.to_string(),
            amount,
            due_date,
            recurrence,
            custom_days,
            is_active: true,
        };
        self.reminders.insert(0, reminder.clone());
        self.persist_reminders()?;
        Ok(reminder)
    }

    pub fn toggle_reminder_active(&mut self, id: Uuid) -> Result<()> {
        if let Some(r) = self.reminders.iter_mut().find(|r| r.id == id) {
            r.is_active = !r.is_active;
            self.persist_reminders()?;
        }
        Ok(())
    }

    pub fn delete_reminder(&mut self, id: Uuid) -> Result<()> {
        let before = self.reminders.len();
        self.reminders.retain(|r| r.id != id);
        if self.reminders.len() != before {
            self.persist_reminders()?;
        }
        Ok(())
    }

    /// Manual balance correction, e.g. reconciling against a real bank
    /// statement. Bypasses the transaction-sum invariant retroactively;
    /// the invariant resumes for transactions added afterwards.
    pub fn update_account_balance(&mut self, account_id: Uuid, new_balance: Decimal) -> Result<()> {
        if let Some(acc) = self.accounts.iter_mut().find(|a| a.id == account_id) {
            acc.balance = new_balance;
            self.persist_accounts()?;
        }
        Ok(())
    }

    /// Sum of expense amounts in the month containing `today`.
    pub fn current_month_expenses(&self, today: NaiveDate) -> Decimal {
        let month = month_key(today);
        self.transactions
            .iter()
            .filter(|t| t.kind == TxKind::Expense && month_key(t.date) == month)
            .map(|t| t.amount)
            .sum()
    }

    pub fn current_budget(&self, today: NaiveDate) -> Option<&Budget> {
        let month = month_key(today);
        self.budgets.iter().find(|b| b.month == month)
    }

    /// Sum of expense amounts on exactly `date`.
    pub fn daily_spending(&self, date: NaiveDate) -> Decimal {
        self.transactions
            .iter()
            .filter(|t| t.kind == TxKind::Expense && t.date == date)
            .map(|t| t.amount)
            .sum()
    }

    fn persist_accounts(&mut self) -> Result<()> {
        store::save(self.store.as_mut(), ACCOUNTS_KEY, &self.accounts)?;
        Ok(())
    }

    fn persist_transactions(&mut self) -> Result<()> {
        store::save(self.store.as_mut(), TRANSACTIONS_KEY, &self.transactions)?;
        Ok(())
    }

    fn persist_loans(&mut self) -> Result<()> {
        store::save(self.store.as_mut(), LOANS_KEY, &self.loans)?;
        Ok(())
    }

    fn persist_budgets(&mut self) -> Result<()> {
        store::save(self.store.as_mut(), BUDGETS_KEY, &self.budgets)?;
        Ok(())
    }

    fn persist_reminders(&mut self) -> Result<()> {
        store::save(self.store.as_mut(), REMINDERS_KEY, &self.reminders)?;
        Ok(())
    }
}

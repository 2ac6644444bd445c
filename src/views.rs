// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Derived views over ledger snapshots. Everything here is a pure function
//! of its inputs and is recomputed on demand; nothing is cached or
//! persisted.

use anyhow::Result;
use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Reminder, Transaction, TxKind};
use crate::utils::{month_end, month_key, month_start};

/// Reminders due within this many days count as upcoming.
pub const REMINDER_WINDOW_DAYS: i64 = 7;
/// At most this many upcoming reminders are surfaced.
pub const REMINDER_LIMIT: usize = 3;
/// Utilization fraction at which the budget status turns to a warning.
const WARNING_PERCENT: Decimal = Decimal::from_parts(80, 0, 0, false, 0);

pub fn month_expenses(txs: &[Transaction], month: &str) -> Decimal {
    txs.iter()
        .filter(|t| t.kind == TxKind::Expense && month_key(t.date) == month)
        .map(|t| t.amount)
        .sum()
}

pub fn month_income(txs: &[Transaction], month: &str) -> Decimal {
    txs.iter()
        .filter(|t| t.kind == TxKind::Income && month_key(t.date) == month)
        .map(|t| t.amount)
        .sum()
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Decimal,
}

/// Expense transactions of `month` grouped by category and summed, sorted
/// descending by total. Ties keep first-encounter order (stable sort over
/// insertion order).
pub fn category_breakdown(txs: &[Transaction], month: &str) -> Vec<CategoryTotal> {
    let mut groups: Vec<CategoryTotal> = Vec::new();
    for t in txs
        .iter()
        .filter(|t| t.kind == TxKind::Expense && month_key(t.date) == month)
    {
        match groups.iter_mut().find(|g| g.category == t.category) {
            Some(g) => g.total += t.amount,
            None => groups.push(CategoryTotal {
                category: t.category.clone(),
                total: t.amount,
            }),
        }
    }
    groups.sort_by(|a, b| b.total.cmp(&a.total));
    groups
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthFlow {
    pub month: String, // YYYY-MM
    pub income: Decimal,
    pub expenses: Decimal,
}

/// Income and expense sums for the last `months` months inclusive of the
/// month containing `today`, ordered oldest to newest.
pub fn monthly_trend(txs: &[Transaction], today: NaiveDate, months: u32) -> Vec<MonthFlow> {
    (0..months)
        .rev()
        .filter_map(|back| today.checked_sub_months(Months::new(back)))
        .map(|d| {
            let month = month_key(d);
            MonthFlow {
                income: month_income(txs, &month),
                expenses: month_expenses(txs, &month),
                month,
            }
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthSummary {
    pub month: String,
    pub income: Decimal,
    pub expenses: Decimal,
    pub net: Decimal,
}

pub fn month_summary(txs: &[Transaction], month: &str) -> MonthSummary {
    let income = month_income(txs, month);
    let expenses = month_expenses(txs, month);
    MonthSummary {
        month: month.to_string(),
        income,
        expenses,
        net: income - expenses,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BudgetUtilization {
    /// Spent-to-limit percentage, capped at 100 even when over.
    pub percent: Decimal,
    pub warning: bool,
    pub over: bool,
    /// Amount past the limit; zero unless `over`.
    pub over_amount: Decimal,
}

pub fn budget_utilization(expenses: Decimal, limit: Decimal) -> BudgetUtilization {
    let hundred = Decimal::from(100);
    let percent = if limit <= Decimal::ZERO {
        if expenses > Decimal::ZERO {
            hundred
        } else {
            Decimal::ZERO
        }
    } else {
        (expenses * hundred / limit).min(hundred)
    };
    let over = expenses > limit;
    BudgetUtilization {
        percent,
        warning: percent >= WARNING_PERCENT,
        over,
        over_amount: if over { expenses - limit } else { Decimal::ZERO },
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UpcomingReminder {
    #[serde(flatten)]
    pub reminder: Reminder,
    #[serde(rename = "daysUntil")]
    pub days_until: i64,
}

/// Active reminders due within the next week ([0, 7] whole days from
/// `today`; overdue ones fall outside the window), soonest first, capped
/// at three.
pub fn upcoming_reminders(reminders: &[Reminder], today: NaiveDate) -> Vec<UpcomingReminder> {
    let mut upcoming: Vec<UpcomingReminder> = reminders
        .iter()
        .filter(|r| r.is_active)
        .map(|r| UpcomingReminder {
            reminder: r.clone(),
            days_until: (r.due_date - today).num_days(),
        })
        .filter(|u| (0..=REMINDER_WINDOW_DAYS).contains(&u.days_until))
        .collect();
    upcoming.sort_by_key(|u| u.days_until);
    upcoming.truncate(REMINDER_LIMIT);
    upcoming
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HeatTier {
    /// No spending at all; rendered separately from `Low`.
    None,
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub spent: Decimal,
    pub tier: HeatTier,
}

/// Per-day spending for every day of `month` ("YYYY-MM"), with heat tiers
/// relative to the month's maximum single-day spend: ratio ≤ 0.33 is low,
/// ≤ 0.66 medium, else high.
pub fn spending_calendar(txs: &[Transaction], month: &str) -> Result<Vec<CalendarDay>> {
    let start = month_start(month)?;
    let end = month_end(month)?;

    let mut days = Vec::new();
    let mut d = start;
    while d <= end {
        let spent: Decimal = txs
            .iter()
            .filter(|t| t.kind == TxKind::Expense && t.date == d)
            .map(|t| t.amount)
            .sum();
        days.push(CalendarDay {
            date: d,
            spent,
            tier: HeatTier::None,
        });
        match d.succ_opt() {
            Some(next) => d = next,
            None => break,
        }
    }

    let max = days.iter().map(|day| day.spent).max().unwrap_or_default();
    if max > Decimal::ZERO {
        let low_cut = max * Decimal::new(33, 2);
        let medium_cut = max * Decimal::new(66, 2);
        for day in &mut days {
            if day.spent.is_zero() {
                continue;
            }
            day.tier = if day.spent <= low_cut {
                HeatTier::Low
            } else if day.spent <= medium_cut {
                HeatTier::Medium
            } else {
                HeatTier::High
            };
        }
    }
    Ok(days)
}

#[derive(Debug, Clone, Serialize)]
pub struct CalendarSummary {
    pub total_spent: Decimal,
    pub average_daily: Decimal,
    pub days_with_spending: usize,
}

/// Month totals for the calendar footer: averages only count days that saw
/// spending.
pub fn calendar_summary(days: &[CalendarDay]) -> CalendarSummary {
    let total_spent: Decimal = days.iter().map(|d| d.spent).sum();
    let days_with_spending = days.iter().filter(|d| d.spent > Decimal::ZERO).count();
    let average_daily = if days_with_spending > 0 {
        (total_spent / Decimal::from(days_with_spending as u64)).round_dp(2)
    } else {
        Decimal::ZERO
    };
    CalendarSummary {
        total_spent,
        average_daily,
        days_with_spending,
    }
}

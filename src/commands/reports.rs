// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::Ledger;
use crate::utils::{fmt_money, maybe_print_json, month_key, parse_month, pretty_table};
use crate::views::{self, HeatTier};
use anyhow::Result;
use chrono::Local;

pub fn handle(ledger: &Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(ledger, sub)?,
        Some(("trend", sub)) => trend(ledger, sub)?,
        Some(("by-category", sub)) => by_category(ledger, sub)?,
        Some(("calendar", sub)) => calendar(ledger, sub)?,
        _ => {}
    }
    Ok(())
}

fn month_arg(sub: &clap::ArgMatches) -> Result<String> {
    match sub.get_one::<String>("month") {
        Some(s) => parse_month(s),
        None => Ok(month_key(Local::now().date_naive())),
    }
}

fn summary(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let month = month_arg(sub)?;
    let summary = views::month_summary(ledger.transactions(), &month);
    if !maybe_print_json(json_flag, jsonl_flag, &summary)? {
        let data = vec![vec![
            summary.month,
            fmt_money(&summary.income),
            fmt_money(&summary.expenses),
            fmt_money(&summary.net),
        ]];
        println!(
            "{}",
            pretty_table(&["Month", "Income", "Expenses", "Net"], data)
        );
    }
    Ok(())
}

fn trend(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let months = *sub.get_one::<u32>("months").unwrap_or(&6);
    let today = Local::now().date_naive();
    let flows = views::monthly_trend(ledger.transactions(), today, months);
    if !maybe_print_json(json_flag, jsonl_flag, &flows)? {
        let data = flows
            .into_iter()
            .map(|f| {
                vec![
                    f.month,
                    format!("{:.2}", f.income),
                    format!("{:.2}", f.expenses),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Month", "Income", "Expense"], data));
    }
    Ok(())
}

fn by_category(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let month = month_arg(sub)?;
    let groups = views::category_breakdown(ledger.transactions(), &month);
    if !maybe_print_json(json_flag, jsonl_flag, &groups)? {
        let total = views::month_expenses(ledger.transactions(), &month);
        let data = groups
            .into_iter()
            .map(|g| {
                let share = if total.is_zero() {
                    "0.0%".to_string()
                } else {
                    format!(
                        "{}%",
                        (g.total * rust_decimal::Decimal::from(100) / total).round_dp(1)
                    )
                };
                vec![g.category, format!("{:.2}", g.total), share]
            })
            .collect();
        println!("{}", pretty_table(&["Category", "Spent", "Share"], data));
    }
    Ok(())
}

fn tier_label(tier: HeatTier) -> &'static str {
    match tier {
        HeatTier::None => "",
        HeatTier::Low => "low",
        HeatTier::Medium => "medium",
        HeatTier::High => "high",
    }
}

fn calendar(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let month = month_arg(sub)?;
    let days = views::spending_calendar(ledger.transactions(), &month)?;
    if !maybe_print_json(json_flag, jsonl_flag, &days)? {
        let summary = views::calendar_summary(&days);
        let data = days
            .into_iter()
            .map(|d| {
                vec![
                    d.date.to_string(),
                    format!("{:.2}", d.spent),
                    tier_label(d.tier).to_string(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Date", "Spent", "Heat"], data));
        println!(
            "Total {} | Avg daily {} | {} day(s) with spending",
            fmt_money(&summary.total_spent),
            fmt_money(&summary.average_daily),
            summary.days_with_spending
        );
    }
    Ok(())
}

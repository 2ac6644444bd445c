// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::Ledger;
use crate::utils::{fmt_money, maybe_print_json, month_key, parse_decimal, parse_month, pretty_table};
use crate::views;
use anyhow::Result;
use chrono::Local;
use serde::Serialize;

pub fn handle(ledger: &mut Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(ledger, sub)?,
        Some(("status", sub)) => status(ledger, sub)?,
        Some(("alert-shown", sub)) => alert_shown(ledger, sub)?,
        _ => {}
    }
    Ok(())
}

fn set(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let month = parse_month(sub.get_one::<String>("month").unwrap())?;
    let limit = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let budget = ledger.set_budget(&month, limit)?;
    println!("Budget set for {} = {}", budget.month, fmt_money(&budget.limit));
    Ok(())
}

#[derive(Serialize)]
struct BudgetStatusRow {
    month: String,
    limit: String,
    spent: String,
    percent: String,
    status: String,
    over_amount: String,
    alert_shown: bool,
}

fn status(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let month = match sub.get_one::<String>("month") {
        Some(s) => parse_month(s)?,
        None => month_key(Local::now().date_naive()),
    };

    let Some(budget) = ledger.budgets().iter().find(|b| b.month == month) else {
        println!("No budget set for {}", month);
        return Ok(());
    };
    let spent = views::month_expenses(ledger.transactions(), &month);
    let util = views::budget_utilization(spent, budget.limit);
    let status = if util.over {
        "over"
    } else if util.warning {
        "warning"
    } else {
        "ok"
    };

    let row = BudgetStatusRow {
        month: month.clone(),
        limit: budget.limit.round_dp(2).to_string(),
        spent: spent.round_dp(2).to_string(),
        percent: util.percent.round_dp(1).to_string(),
        status: status.to_string(),
        over_amount: util.over_amount.round_dp(2).to_string(),
        alert_shown: budget.alert_shown,
    };
    if !maybe_print_json(json_flag, jsonl_flag, &row)? {
        let data = vec![vec![
            row.month,
            row.limit,
            row.spent,
            format!("{}%", row.percent),
            row.status,
            row.over_amount,
            if row.alert_shown { "yes" } else { "no" }.to_string(),
        ]];
        println!(
            "{}",
            pretty_table(
                &["Month", "Limit", "Spent", "Used", "Status", "Over by", "Alerted"],
                data,
            )
        );
    }
    Ok(())
}

fn alert_shown(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let month = parse_month(sub.get_one::<String>("month").unwrap())?;
    ledger.mark_budget_alert_shown(&month)?;
    println!("Marked budget alert shown for {}", month);
    Ok(())
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::Ledger;
use crate::models::TxKind;
use crate::utils::{fmt_money, maybe_print_json, month_key, parse_date, parse_decimal, parse_month, pretty_table};
use anyhow::{Context, Result};
use chrono::Local;
use serde::Serialize;
use uuid::Uuid;

pub fn handle(ledger: &mut Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(ledger, sub)?,
        Some(("list", sub)) => list(ledger, sub)?,
        Some(("rm", sub)) => rm(ledger, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let account_name = sub.get_one::<String>("account").unwrap();
    let kind = match sub.get_one::<String>("type").unwrap().as_str() {
        "income" => TxKind::Income,
        _ => TxKind::Expense,
    };
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let category = sub.get_one::<String>("category").unwrap();
    let description = sub.get_one::<String>("description").unwrap();
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_date(s)?,
        None => Local::now().date_naive(),
    };
    let time = match sub.get_one::<String>("time") {
        Some(s) => s.clone(),
        None => Local::now().format("%H:%M").to_string(),
    };

    let account_id = ledger
        .account_by_name(account_name)
        .with_context(|| format!("Account '{}' not found", account_name))?
        .id;
    let tx = ledger.add_transaction(account_id, kind, amount, category, description, date, &time)?;
    println!(
        "Recorded {} {} ({}) on {} (acct: {})",
        tx.kind.as_str(),
        fmt_money(&tx.amount),
        tx.category,
        tx.date,
        account_name
    );
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub time: String,
    pub account: String,
    pub r#type: String,
    pub amount: String,
    pub category: String,
    pub description: String,
}

pub fn query_rows(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let month = match sub.get_one::<String>("month") {
        Some(s) => Some(parse_month(s)?),
        None => None,
    };
    let account_id = match sub.get_one::<String>("account") {
        Some(name) => Some(
            ledger
                .account_by_name(name)
                .with_context(|| format!("Account '{}' not found", name))?
                .id,
        ),
        None => None,
    };
    let category = sub.get_one::<String>("category");
    let limit = sub.get_one::<usize>("limit").copied();

    let mut rows = Vec::new();
    for t in ledger.transactions() {
        if let Some(ref m) = month {
            if month_key(t.date) != *m {
                continue;
            }
        }
        if let Some(id) = account_id {
            if t.account_id != id {
                continue;
            }
        }
        if let Some(cat) = category {
            if t.category != *cat {
                continue;
            }
        }
        let account = ledger
            .accounts()
            .iter()
            .find(|a| a.id == t.account_id)
            .map(|a| a.name.clone())
            .unwrap_or_default();
        rows.push(TransactionRow {
            id: t.id.to_string(),
            date: t.date.to_string(),
            time: t.time.clone(),
            account,
            r#type: t.kind.as_str().to_string(),
            amount: t.amount.round_dp(2).to_string(),
            category: t.category.clone(),
            description: t.description.clone(),
        });
        if let Some(n) = limit {
            if rows.len() == n {
                break;
            }
        }
    }
    Ok(rows)
}

fn list(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(ledger, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .into_iter()
            .map(|r| {
                vec![
                    r.id,
                    r.date,
                    r.time,
                    r.account,
                    r.r#type,
                    r.amount,
                    r.category,
                    r.description,
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &[
                    "Id",
                    "Date",
                    "Time",
                    "Account",
                    "Type",
                    "Amount",
                    "Category",
                    "Description"
                ],
                rows,
            )
        );
    }
    Ok(())
}

fn rm(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    let id = Uuid::parse_str(id).with_context(|| format!("Invalid transaction id '{}'", id))?;
    ledger.delete_transaction(id)?;
    println!("Removed transaction {}", id);
    Ok(())
}

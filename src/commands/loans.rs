// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::Ledger;
use crate::models::LoanKind;
use crate::utils::{fmt_money, maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::{Context, Result};
use chrono::Local;
use serde::Serialize;
use uuid::Uuid;

pub fn handle(ledger: &mut Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(ledger, sub)?,
        Some(("list", sub)) => list(ledger, sub)?,
        Some(("settle", sub)) => settle(ledger, sub)?,
        Some(("rm", sub)) => rm(ledger, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let kind = match sub.get_one::<String>("type").unwrap().as_str() {
        "given" => LoanKind::Given,
        _ => LoanKind::Taken,
    };
    let person = sub.get_one::<String>("person").unwrap();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let description = sub.get_one::<String>("description").unwrap();
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_date(s)?,
        None => Local::now().date_naive(),
    };
    let loan = ledger.add_loan(kind, person, amount, description, date)?;
    println!(
        "Recorded loan {} {} {} on {}",
        loan.kind.as_str(),
        fmt_money(&loan.amount),
        match loan.kind {
            LoanKind::Given => format!("to {}", person),
            LoanKind::Taken => format!("from {}", person),
        },
        loan.date
    );
    Ok(())
}

#[derive(Serialize)]
struct LoanRow {
    id: String,
    date: String,
    r#type: String,
    person: String,
    amount: String,
    description: String,
    settled: bool,
}

fn list(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let rows: Vec<LoanRow> = ledger
        .loans()
        .iter()
        .map(|l| LoanRow {
            id: l.id.to_string(),
            date: l.date.to_string(),
            r#type: l.kind.as_str().to_string(),
            person: l.person_name.clone(),
            amount: l.amount.round_dp(2).to_string(),
            description: l.description.clone(),
            settled: l.is_settled,
        })
        .collect();
    if !maybe_print_json(json_flag, jsonl_flag, &rows)? {
        let data = rows
            .into_iter()
            .map(|r| {
                vec![
                    r.id,
                    r.date,
                    r.r#type,
                    r.person,
                    r.amount,
                    r.description,
                    if r.settled { "yes" } else { "no" }.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Date", "Type", "Person", "Amount", "Description", "Settled"],
                data,
            )
        );
    }
    Ok(())
}

fn settle(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    let id = Uuid::parse_str(id).with_context(|| format!("Invalid loan id '{}'", id))?;
    ledger.toggle_loan_settled(id)?;
    println!("Toggled settlement for loan {}", id);
    Ok(())
}

fn rm(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    let id = Uuid::parse_str(id).with_context(|| format!("Invalid loan id '{}'", id))?;
    ledger.delete_loan(id)?;
    println!("Removed loan {}", id);
    Ok(())
}

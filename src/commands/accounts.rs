// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::Ledger;
use crate::utils::{fmt_money, maybe_print_json, parse_decimal, pretty_table};
use anyhow::{Context, Result};
use serde::Serialize;

pub fn handle(ledger: &mut Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(ledger, sub)?,
        Some(("set-balance", sub)) => set_balance(ledger, sub)?,
        _ => {}
    }
    Ok(())
}

#[derive(Serialize)]
struct AccountRow {
    name: String,
    r#type: String,
    balance: String,
    parent: String,
}

fn list(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let rows: Vec<AccountRow> = ledger
        .accounts()
        .iter()
        .map(|a| AccountRow {
            name: a.name.clone(),
            r#type: a.kind.as_str().to_string(),
            balance: fmt_money(&a.balance),
            parent: a
                .parent_id
                .and_then(|pid| ledger.accounts().iter().find(|p| p.id == pid))
                .map(|p| p.name.clone())
                .unwrap_or_default(),
        })
        .collect();
    if !maybe_print_json(json_flag, jsonl_flag, &rows)? {
        let data = rows
            .into_iter()
            .map(|r| vec![r.name, r.r#type, r.balance, r.parent])
            .collect();
        println!(
            "{}",
            pretty_table(&["Name", "Type", "Balance", "Parent"], data)
        );
    }
    Ok(())
}

fn set_balance(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let balance = parse_decimal(sub.get_one::<String>("balance").unwrap())?;
    let id = ledger
        .account_by_name(name)
        .with_context(|| format!("Account '{}' not found", name))?
        .id;
    ledger.update_account_balance(id, balance)?;
    println!("Balance for '{}' set to {}", name, fmt_money(&balance));
    Ok(())
}

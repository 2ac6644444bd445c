// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::Ledger;
use crate::models::Recurrence;
use crate::utils::{fmt_money, maybe_print_json, parse_date, parse_decimal, pretty_table};
use crate::views;
use anyhow::{Context, Result};
use chrono::Local;
use serde::Serialize;
use uuid::Uuid;

pub fn handle(ledger: &mut Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(ledger, sub)?,
        Some(("list", sub)) => list(ledger, sub)?,
        Some(("upcoming", sub)) => upcoming(ledger, sub)?,
        Some(("toggle", sub)) => toggle(ledger, sub)?,
        Some(("rm", sub)) => rm(ledger, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let due = parse_date(sub.get_one::<String>("due").unwrap())?;
    let recurrence = match sub.get_one::<String>("recurrence").unwrap().as_str() {
        "weekly" => Recurrence::Weekly,
        "yearly" => Recurrence::Yearly,
        "custom" => Recurrence::Custom,
        _ => Recurrence::Monthly,
    };
    let custom_days = sub.get_one::<u32>("every").copied();
    let reminder = ledger.add_reminder(name, amount, due, recurrence, custom_days)?;
    println!(
        "Added reminder '{}' ({}, {}) due {}",
        reminder.name,
        fmt_money(&reminder.amount),
        reminder.recurrence.as_str(),
        reminder.due_date
    );
    Ok(())
}

#[derive(Serialize)]
struct ReminderRow {
    id: String,
    name: String,
    amount: String,
    due: String,
    recurrence: String,
    every: String,
    active: bool,
}

fn list(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let rows: Vec<ReminderRow> = ledger
        .reminders()
        .iter()
        .map(|r| ReminderRow {
            id: r.id.to_string(),
            name: r.name.clone(),
            amount: r.amount.round_dp(2).to_string(),
            due: r.due_date.to_string(),
            recurrence: r.recurrence.as_str().to_string(),
            every: r
                .custom_days
                .map(|d| format!("{}d", d))
                .unwrap_or_default(),
            active: r.is_active,
        })
        .collect();
    if !maybe_print_json(json_flag, jsonl_flag, &rows)? {
        let data = rows
            .into_iter()
            .map(|r| {
                vec![
                    r.id,
                    r.name,
                    r.amount,
                    r.due,
                    r.recurrence,
                    r.every,
                    if r.active { "yes" } else { "no" }.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Name", "Amount", "Due", "Recurrence", "Every", "Active"],
                data,
            )
        );
    }
    Ok(())
}

fn upcoming(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let today = Local::now().date_naive();
    let upcoming = views::upcoming_reminders(ledger.reminders(), today);
    if !maybe_print_json(json_flag, jsonl_flag, &upcoming)? {
        if upcoming.is_empty() {
            println!("No upcoming reminders");
            return Ok(());
        }
        let data = upcoming
            .into_iter()
            .map(|u| {
                vec![
                    u.reminder.name.clone(),
                    fmt_money(&u.reminder.amount),
                    u.reminder.due_date.to_string(),
                    if u.days_until == 0 {
                        "Today".to_string()
                    } else {
                        format!("{}d", u.days_until)
                    },
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Name", "Amount", "Due", "In"], data));
    }
    Ok(())
}

fn toggle(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    let id = Uuid::parse_str(id).with_context(|| format!("Invalid reminder id '{}'", id))?;
    ledger.toggle_reminder_active(id)?;
    println!("Toggled reminder {}", id);
    Ok(())
}

fn rm(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    let id = Uuid::parse_str(id).with_context(|| format!("Invalid reminder id '{}'", id))?;
    ledger.delete_reminder(id)?;
    println!("Removed reminder {}", id);
    Ok(())
}

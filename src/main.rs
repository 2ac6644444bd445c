// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use pocketledger::ledger::Ledger;
use pocketledger::store::JsonFileStore;
use pocketledger::{cli, commands};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let store = JsonFileStore::open_default()?;
    let data_dir = store.dir().to_path_buf();
    let mut ledger = Ledger::open(Box::new(store))?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Ledger initialized at {}", data_dir.display());
        }
        Some(("account", sub)) => commands::accounts::handle(&mut ledger, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&mut ledger, sub)?,
        Some(("loan", sub)) => commands::loans::handle(&mut ledger, sub)?,
        Some(("budget", sub)) => commands::budgets::handle(&mut ledger, sub)?,
        Some(("reminder", sub)) => commands::reminders::handle(&mut ledger, sub)?,
        Some(("report", sub)) => commands::reports::handle(&ledger, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&ledger)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print output as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print output as JSON lines"),
    )
}

pub fn build_cli() -> Command {
    Command::new("pocketledger")
        .about("Offline personal finance tracker: accounts, transactions, loans, budgets, reminders")
        .version(clap::crate_version!())
        .subcommand(Command::new("init").about("Initialize the data directory and seed accounts"))
        .subcommand(
            Command::new("account")
                .about("Manage accounts")
                .subcommand(json_flags(Command::new("list").about("List accounts and balances")))
                .subcommand(
                    Command::new("set-balance")
                        .about("Manually correct an account balance (reconciliation)")
                        .arg(Arg::new("name").required(true))
                        .arg(Arg::new("balance").required(true)),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Manage transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction")
                        .arg(Arg::new("account").required(true).help("Account name"))
                        .arg(
                            Arg::new("type")
                                .required(true)
                                .value_parser(["income", "expense"]),
                        )
                        .arg(Arg::new("amount").required(true))
                        .arg(Arg::new("category").required(true))
                        .arg(
                            Arg::new("description")
                                .long("description")
                                .short('m')
                                .default_value(""),
                        )
                        .arg(Arg::new("date").long("date").help("YYYY-MM-DD, default today"))
                        .arg(Arg::new("time").long("time").help("HH:MM, default now")),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List transactions, newest first")
                        .arg(Arg::new("month").long("month").help("Filter by YYYY-MM"))
                        .arg(Arg::new("account").long("account"))
                        .arg(Arg::new("category").long("category"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(
                    Command::new("rm")
                        .about("Delete a transaction and reverse its balance delta")
                        .arg(Arg::new("id").required(true)),
                ),
        )
        .subcommand(
            Command::new("loan")
                .about("Track loans given and taken")
                .subcommand(
                    Command::new("add")
                        .about("Record a loan")
                        .arg(
                            Arg::new("type")
                                .required(true)
                                .value_parser(["given", "taken"]),
                        )
                        .arg(Arg::new("person").required(true))
                        .arg(Arg::new("amount").required(true))
                        .arg(
                            Arg::new("description")
                                .long("description")
                                .short('m')
                                .default_value(""),
                        )
                        .arg(Arg::new("date").long("date").help("YYYY-MM-DD, default today")),
                )
                .subcommand(json_flags(Command::new("list").about("List loans")))
                .subcommand(
                    Command::new("settle")
                        .about("Toggle a loan's settled flag")
                        .arg(Arg::new("id").required(true)),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a loan")
                        .arg(Arg::new("id").required(true)),
                ),
        )
        .subcommand(
            Command::new("budget")
                .about("Monthly spending budgets")
                .subcommand(
                    Command::new("set")
                        .about("Set (or replace) the budget limit for a month")
                        .arg(Arg::new("month").required(true).help("YYYY-MM"))
                        .arg(Arg::new("amount").required(true)),
                )
                .subcommand(json_flags(
                    Command::new("status")
                        .about("Show utilization against the budget")
                        .arg(Arg::new("month").long("month").help("YYYY-MM, default current")),
                ))
                .subcommand(
                    Command::new("alert-shown")
                        .about("Mark the over-80% alert as surfaced for a month")
                        .arg(Arg::new("month").required(true).help("YYYY-MM")),
                ),
        )
        .subcommand(
            Command::new("reminder")
                .about("Recurring payment reminders")
                .subcommand(
                    Command::new("add")
                        .about("Add a reminder")
                        .arg(Arg::new("name").required(true))
                        .arg(Arg::new("amount").required(true))
                        .arg(Arg::new("due").required(true).help("Due date YYYY-MM-DD"))
                        .arg(
                            Arg::new("recurrence")
                                .long("recurrence")
                                .default_value("monthly")
                                .value_parser(["weekly", "monthly", "yearly", "custom"]),
                        )
                        .arg(
                            Arg::new("every")
                                .long("every")
                                .value_parser(value_parser!(u32))
                                .help("Day interval, required with custom recurrence"),
                        ),
                )
                .subcommand(json_flags(Command::new("list").about("List reminders")))
                .subcommand(json_flags(
                    Command::new("upcoming").about("Reminders due within the next week"),
                ))
                .subcommand(
                    Command::new("toggle")
                        .about("Toggle a reminder's active flag")
                        .arg(Arg::new("id").required(true)),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a reminder")
                        .arg(Arg::new("id").required(true)),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Derived views over the ledger")
                .subcommand(json_flags(
                    Command::new("summary")
                        .about("Income, expenses, and net for a month")
                        .arg(Arg::new("month").long("month").help("YYYY-MM, default current")),
                ))
                .subcommand(json_flags(
                    Command::new("trend")
                        .about("Income/expense totals per month, oldest first")
                        .arg(
                            Arg::new("months")
                                .long("months")
                                .default_value("6")
                                .value_parser(value_parser!(u32)),
                        ),
                ))
                .subcommand(json_flags(
                    Command::new("by-category")
                        .about("Expense totals per category, largest first")
                        .arg(Arg::new("month").long("month").help("YYYY-MM, default current")),
                ))
                .subcommand(json_flags(
                    Command::new("calendar")
                        .about("Daily spending heatmap for a month")
                        .arg(Arg::new("month").long("month").help("YYYY-MM, default current")),
                )),
        )
        .subcommand(Command::new("doctor").about("Check ledger integrity"))
}

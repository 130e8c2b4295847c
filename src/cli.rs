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
            .conflicts_with("jsonl")
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

fn index_arg(id: &'static str, help: &'static str) -> Arg {
    Arg::new(id)
        .required(true)
        .value_parser(value_parser!(usize))
        .help(help)
}

fn tx_record(name: &'static str, about: &'static str) -> Command {
    Command::new(name)
        .about(about)
        .arg(Arg::new("account").required(true).help("Account name"))
        .arg(Arg::new("amount").required(true).help("Non-negative amount"))
        .arg(
            Arg::new("comment")
                .long("comment")
                .short('m')
                .help("Free-text comment"),
        )
}

pub fn build_cli() -> Command {
    Command::new("purse")
        .about("Multi-currency accounts with a converted total balance")
        .version(clap::crate_version!())
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .env("PURSE_DB")
                .value_parser(value_parser!(std::path::PathBuf))
                .help("Path to the storage file (defaults to the platform data dir)"),
        )
        .subcommand(Command::new("init").about("Create the storage file"))
        .subcommand(
            Command::new("account")
                .about("Manage accounts")
                .subcommand(
                    Command::new("add")
                        .about("Add an account")
                        .arg(Arg::new("name").required(true))
                        .arg(
                            Arg::new("currency")
                                .long("currency")
                                .short('c')
                                .help("Currency code (defaults to the display currency)"),
                        )
                        .arg(
                            Arg::new("balance")
                                .long("balance")
                                .short('b')
                                .default_value("0")
                                .allow_hyphen_values(true)
                                .help("Opening balance"),
                        ),
                )
                .subcommand(json_flags(Command::new("list").about("List accounts")))
                .subcommand(
                    Command::new("rm")
                        .about("Delete an account")
                        .arg(index_arg("index", "Position shown by 'account list'")),
                )
                .subcommand(
                    Command::new("move")
                        .about("Move an account to another position")
                        .arg(index_arg("from", "Current position"))
                        .arg(index_arg("to", "New position")),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and inspect transactions")
                .subcommand(tx_record("income", "Record income"))
                .subcommand(tx_record("expense", "Record an expense"))
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List an account's transactions, newest first")
                        .arg(Arg::new("account").required(true)),
                ))
                .subcommand(
                    Command::new("rm")
                        .about("Delete a transaction")
                        .arg(Arg::new("account").required(true))
                        .arg(index_arg("index", "Position shown by 'tx list'")),
                ),
        )
        .subcommand(json_flags(
            Command::new("total").about("Show every account and the total in the display currency"),
        ))
        .subcommand(
            Command::new("fx")
                .about("Exchange rates and display currency")
                .subcommand(Command::new("list").about("Show the rate table"))
                .subcommand(
                    Command::new("convert")
                        .about("Convert an amount")
                        .arg(Arg::new("amount").required(true).allow_hyphen_values(true))
                        .arg(Arg::new("from").required(true))
                        .arg(Arg::new("to").required(true)),
                )
                .subcommand(
                    Command::new("set-display")
                        .about("Set the display currency")
                        .arg(Arg::new("currency").required(true)),
                ),
        )
        .subcommand(
            Command::new("doctor")
                .about("Check balances and totals for consistency")
                .long_about(
                    "Check balances and totals for consistency.\n\n\
                     Accounts stored without an opening balance have it inferred from \
                     the stored balance, so their balance cannot be checked against \
                     their transactions; a non-zero inferred opening is listed as \
                     unverified_opening instead.",
                ),
        )
}

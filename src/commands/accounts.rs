// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::app::App;
use crate::utils::{
    fmt_money, maybe_print_json, parse_currency, parse_decimal, pretty_table, required,
    required_index,
};
use anyhow::Result;
use serde::Serialize;

pub fn handle(app: &mut App, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(app, sub)?,
        Some(("list", sub)) => list(app, sub)?,
        Some(("rm", sub)) => {
            let index = required_index(sub, "index")?;
            let removed = app.delete_account(index)?;
            println!(
                "Removed account '{}' ({})",
                removed.name,
                fmt_money(&removed.balance, &removed.currency)
            );
        }
        Some(("move", sub)) => {
            let from = required_index(sub, "from")?;
            let to = required_index(sub, "to")?;
            app.move_account(from, to)?;
            println!("Moved account #{} to #{}", from, to);
        }
        _ => {}
    }
    Ok(())
}

fn add(app: &mut App, sub: &clap::ArgMatches) -> Result<()> {
    let name = required(sub, "name")?.trim().to_string();
    let ccy = match sub.get_one::<String>("currency") {
        Some(c) => parse_currency(app.rates(), c)?,
        None => app.display_currency().to_string(),
    };
    let balance = parse_decimal(required(sub, "balance")?)?;
    app.add_account(&name, &ccy, balance)?;
    println!("Added account '{}' ({})", name, fmt_money(&balance, &ccy));
    Ok(())
}

#[derive(Serialize)]
pub struct AccountRow {
    pub index: usize,
    pub name: String,
    pub currency: String,
    pub balance: String,
    pub transactions: usize,
}

pub fn rows(app: &App) -> Vec<AccountRow> {
    app.accounts()
        .iter()
        .enumerate()
        .map(|(index, a)| AccountRow {
            index,
            name: a.name.clone(),
            currency: a.currency.clone(),
            balance: format!("{:.2}", a.balance),
            transactions: a.transactions.len(),
        })
        .collect()
}

fn list(app: &App, sub: &clap::ArgMatches) -> Result<()> {
    let data = rows(app);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let table: Vec<Vec<String>> = data
            .into_iter()
            .map(|r| {
                vec![
                    r.index.to_string(),
                    r.name,
                    r.currency,
                    r.balance,
                    r.transactions.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["#", "Name", "Currency", "Balance", "Transactions"], table)
        );
    }
    Ok(())
}

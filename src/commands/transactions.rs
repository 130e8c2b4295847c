// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::app::App;
use crate::models::TransactionKind;
use crate::utils::{
    fmt_money, fmt_timestamp, maybe_print_json, parse_amount, pretty_table, required,
    required_index,
};
use anyhow::{Result, anyhow};
use serde::Serialize;

pub fn handle(app: &mut App, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("income", sub)) => record(app, sub, TransactionKind::Income)?,
        Some(("expense", sub)) => record(app, sub, TransactionKind::Expense)?,
        Some(("list", sub)) => list(app, sub)?,
        Some(("rm", sub)) => remove(app, sub)?,
        _ => {}
    }
    Ok(())
}

fn record(app: &mut App, sub: &clap::ArgMatches, kind: TransactionKind) -> Result<()> {
    let account = required(sub, "account")?;
    let amount = parse_amount(required(sub, "amount")?)?;
    let comment = sub
        .get_one::<String>("comment")
        .map(|s| s.trim())
        .unwrap_or_default();
    app.record_transaction(account, kind, amount, comment)?;
    let acct = app
        .account(account)
        .ok_or_else(|| anyhow!("Account '{}' not found", account))?;
    println!(
        "Recorded {} of {} on '{}' (balance {})",
        kind.as_str(),
        fmt_money(&amount, &acct.currency),
        account,
        fmt_money(&acct.balance, &acct.currency)
    );
    Ok(())
}

fn remove(app: &mut App, sub: &clap::ArgMatches) -> Result<()> {
    let account = required(sub, "account")?;
    let index = required_index(sub, "index")?;
    app.delete_transaction(account, index)?;
    if let Some(acct) = app.account(account) {
        println!(
            "Deleted transaction #{} from '{}' (balance {})",
            index,
            account,
            fmt_money(&acct.balance, &acct.currency)
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub index: usize,
    pub date: String,
    pub r#type: String,
    pub amount: String,
    pub currency: String,
    pub comment: String,
}

pub fn query_rows(app: &App, account: &str) -> Result<Vec<TransactionRow>> {
    let acct = app
        .account(account)
        .ok_or_else(|| anyhow!("Account '{}' not found", account))?;
    Ok(acct
        .transactions
        .iter()
        .enumerate()
        .map(|(index, t)| TransactionRow {
            index,
            date: fmt_timestamp(t.date),
            r#type: t.kind.as_str().to_string(),
            amount: format!("{:.2}", t.amount),
            currency: acct.currency.clone(),
            comment: t.comment.clone(),
        })
        .collect())
}

fn list(app: &App, sub: &clap::ArgMatches) -> Result<()> {
    let data = query_rows(app, required(sub, "account")?)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows: Vec<Vec<String>> = data
            .into_iter()
            .map(|r| {
                vec![
                    r.index.to_string(),
                    r.date,
                    r.r#type,
                    r.amount,
                    r.currency,
                    r.comment,
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["#", "Date", "Type", "Amount", "CCY", "Comment"], rows)
        );
    }
    Ok(())
}

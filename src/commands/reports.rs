// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::app::App;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::Result;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct TotalLine {
    pub account: String,
    pub balance: String,
    pub currency: String,
    pub converted: String,
}

#[derive(Debug, Serialize)]
pub struct TotalReport {
    pub currency: String,
    pub accounts: Vec<TotalLine>,
    pub total: String,
}

pub fn total_report(app: &App) -> Result<TotalReport> {
    let mut accounts = Vec::new();
    for a in app.accounts() {
        let converted = app.converted_balance(a)?;
        accounts.push(TotalLine {
            account: a.name.clone(),
            balance: format!("{:.2}", a.balance),
            currency: a.currency.clone(),
            converted: format!("{:.2}", converted),
        });
    }
    Ok(TotalReport {
        currency: app.display_currency().to_string(),
        accounts,
        total: format!("{:.2}", app.total()),
    })
}

pub fn handle(app: &App, m: &clap::ArgMatches) -> Result<()> {
    let report = total_report(app)?;
    if maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &report)? {
        return Ok(());
    }
    let ccy = report.currency.clone();
    let rows: Vec<Vec<String>> = report
        .accounts
        .into_iter()
        .map(|l| vec![l.account, l.balance, l.currency, l.converted])
        .collect();
    let converted_header = format!("In {}", ccy);
    println!(
        "{}",
        pretty_table(
            &["Account", "Balance", "CCY", converted_header.as_str()],
            rows
        )
    );
    println!("Total balance: {}", fmt_money(&app.total(), &ccy));
    Ok(())
}

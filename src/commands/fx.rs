// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::app::App;
use crate::utils::{fmt_money, parse_currency, parse_decimal, pretty_table, required};
use anyhow::Result;

pub fn handle(app: &mut App, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set-display", sub)) => {
            let ccy = parse_currency(app.rates(), required(sub, "currency")?)?;
            app.set_display_currency(&ccy)?;
            println!(
                "Display currency set to {} (total {})",
                ccy,
                fmt_money(&app.total(), &ccy)
            );
        }
        Some(("list", _)) => list_rates(app)?,
        Some(("convert", sub)) => convert_amount(app, sub)?,
        _ => {}
    }
    Ok(())
}

fn list_rates(app: &App) -> Result<()> {
    let rates = app.rates();
    let mut data = Vec::new();
    // Selectable currencies first, in their configured order.
    for code in app.available_currencies() {
        data.push(vec![code.clone(), rates.rate(code)?.to_string(), "yes".into()]);
    }
    for code in rates.codes() {
        if !app.available_currencies().iter().any(|c| c == code) {
            data.push(vec![code.to_string(), rates.rate(code)?.to_string(), "no".into()]);
        }
    }
    println!("{}", pretty_table(&["Currency", "Rate", "Selectable"], data));
    println!("Display currency: {}", app.display_currency());
    Ok(())
}

fn convert_amount(app: &App, sub: &clap::ArgMatches) -> Result<()> {
    let amount = parse_decimal(required(sub, "amount")?)?;
    let from = parse_currency(app.rates(), required(sub, "from")?)?;
    let to = parse_currency(app.rates(), required(sub, "to")?)?;
    let res = app.rates().convert(&from, &to, amount)?;
    println!("{} {} -> {}", amount, from, fmt_money(&res, &to));
    Ok(())
}

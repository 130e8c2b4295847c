// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::app::App;
use crate::utils::{fmt_money, pretty_table};
use anyhow::Result;
use std::collections::HashSet;

/// Issues found in the loaded state, as (kind, detail) rows.
pub fn diagnose(app: &App) -> Result<Vec<Vec<String>>> {
    let mut rows = Vec::new();

    // 1) Cached balances that disagree with their transactions
    for a in app.inconsistent_accounts() {
        rows.push(vec![
            "balance_mismatch".into(),
            format!(
                "{}: stored {}, computed {}",
                a.name,
                fmt_money(&a.balance, &a.currency),
                a.computed_balance()
                    .map(|b| fmt_money(&b, &a.currency))
                    .unwrap_or_else(|| "out of range".into())
            ),
        ]);
    }

    // 2) Snapshots without an opening balance get one inferred from the cached
    // balance, which check 1 then trusts
    for a in app.accounts() {
        if a.opening_inferred && !a.opening_balance.is_zero() && !a.transactions.is_empty() {
            rows.push(vec![
                "unverified_opening".into(),
                format!(
                    "{}: opening {} inferred from the stored balance",
                    a.name,
                    fmt_money(&a.opening_balance, &a.currency)
                ),
            ]);
        }
    }

    // 3) Duplicate names; name lookups only reach the first one
    let mut seen = HashSet::new();
    for a in app.accounts() {
        if !seen.insert(a.name.trim()) {
            rows.push(vec!["duplicate_name".into(), a.name.clone()]);
        }
    }

    // 4) Transaction dates must be unique and newest first
    for a in app.accounts() {
        if a.transactions.windows(2).any(|w| w[0].date <= w[1].date) {
            rows.push(vec!["transaction_order".into(), a.name.clone()]);
        }
    }

    // 5) Amounts are non-negative; the kind carries the sign
    for a in app.accounts() {
        for (i, t) in a.transactions.iter().enumerate() {
            if t.amount.is_sign_negative() && !t.amount.is_zero() {
                rows.push(vec![
                    "negative_amount".into(),
                    format!("{} #{}: {}", a.name, i, fmt_money(&t.amount, &a.currency)),
                ]);
            }
        }
    }

    // 6) Running total against a full recompute
    let recomputed = app.recomputed_total()?;
    if recomputed != app.total() {
        rows.push(vec![
            "total_drift".into(),
            format!(
                "running {} vs recomputed {}",
                fmt_money(&app.total(), app.display_currency()),
                fmt_money(&recomputed, app.display_currency())
            ),
        ]);
    }

    Ok(rows)
}

pub fn handle(app: &App) -> Result<()> {
    let rows = diagnose(app)?;
    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}

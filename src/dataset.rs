// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;

use anyhow::{Context, Result, bail};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::Account;
use crate::rates::RateTable;

const BUNDLED: &str = include_str!("../assets/init.json");

#[derive(Debug, Clone, Deserialize)]
pub struct CurrencySettings {
    /// Default display currency.
    pub base: String,
    /// Codes offered for selection, in display order.
    pub available: Vec<String>,
    pub rates: BTreeMap<String, Decimal>,
}

/// Data compiled into the binary: currencies and the seed accounts used when
/// nothing has been saved yet.
#[derive(Debug, Clone, Deserialize)]
pub struct Dataset {
    pub currencies: CurrencySettings,
    #[serde(default)]
    pub accounts: Vec<Account>,
}

impl Dataset {
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED).context("Bundled dataset is invalid")
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let ds: Dataset = serde_json::from_str(raw).context("Failed to parse dataset")?;
        let rates = ds.rate_table()?;
        if !rates.contains(&ds.currencies.base) {
            bail!("Base currency {} has no rate", ds.currencies.base);
        }
        for code in &ds.currencies.available {
            if !rates.contains(code) {
                bail!("Available currency {} has no rate", code);
            }
        }
        Ok(ds)
    }

    pub fn rate_table(&self) -> Result<RateTable> {
        Ok(RateTable::new(
            self.currencies
                .rates
                .iter()
                .map(|(code, rate)| (code.as_str(), *rate)),
        )?)
    }
}

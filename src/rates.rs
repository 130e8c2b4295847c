// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{FinanceError, FinanceResult};

/// Round to cents, halves away from zero.
pub fn round2(d: Decimal) -> Decimal {
    d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Static exchange rates, each expressed against one implicit base currency.
#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    rates: HashMap<String, Decimal>,
}

impl RateTable {
    pub fn new<I, S>(rates: I) -> FinanceResult<Self>
    where
        I: IntoIterator<Item = (S, Decimal)>,
        S: AsRef<str>,
    {
        let mut out = HashMap::new();
        for (code, rate) in rates {
            let code = code.as_ref().trim().to_uppercase();
            if code.is_empty() {
                return Err(FinanceError::InvalidInput("empty currency code".into()));
            }
            if rate <= Decimal::ZERO {
                return Err(FinanceError::InvalidInput(format!(
                    "rate for {} must be positive, got {}",
                    code, rate
                )));
            }
            out.insert(code, rate);
        }
        Ok(Self { rates: out })
    }

    pub fn contains(&self, code: &str) -> bool {
        self.rates.contains_key(code)
    }

    pub fn rate(&self, code: &str) -> FinanceResult<Decimal> {
        self.rates
            .get(code)
            .copied()
            .ok_or_else(|| FinanceError::UnknownCurrency(code.to_string()))
    }

    /// Currency codes in alphabetical order.
    pub fn codes(&self) -> Vec<&str> {
        let mut v: Vec<&str> = self.rates.keys().map(String::as_str).collect();
        v.sort_unstable();
        v
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// `amount` in `to`, without rounding.
    pub fn convert_exact(&self, from: &str, to: &str, amount: Decimal) -> FinanceResult<Decimal> {
        let to_rate = self.rate(to)?;
        let from_rate = self.rate(from)?;
        if from == to {
            return Ok(amount);
        }
        amount
            .checked_mul(to_rate)
            .and_then(|v| v.checked_div(from_rate))
            .ok_or_else(|| {
                FinanceError::InvalidInput(format!("{} {} is out of range", amount, from))
            })
    }

    /// `amount` in `to`, rounded to cents.
    pub fn convert(&self, from: &str, to: &str, amount: Decimal) -> FinanceResult<Decimal> {
        self.convert_exact(from, to, amount).map(round2)
    }
}

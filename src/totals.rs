// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;

use crate::error::{FinanceError, FinanceResult};
use crate::models::{Account, BalanceDelta};
use crate::rates::{RateTable, round2};

/// Sum of all account balances in one display currency.
///
/// The running value is kept unrounded and only rounded when read, so any
/// sequence of `apply` calls lands on the same cents as `recompute`.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateBalance {
    currency: String,
    exact: Decimal,
}

impl AggregateBalance {
    pub fn empty(rates: &RateTable, currency: &str) -> FinanceResult<Self> {
        rates.rate(currency)?;
        Ok(Self {
            currency: currency.to_string(),
            exact: Decimal::ZERO,
        })
    }

    pub fn recompute(rates: &RateTable, accounts: &[Account], currency: &str) -> FinanceResult<Self> {
        let mut total = Self::empty(rates, currency)?;
        for account in accounts {
            let converted = rates.convert_exact(&account.currency, currency, account.balance)?;
            total.exact = total.exact.checked_add(converted).ok_or_else(|| {
                FinanceError::InvalidInput(format!("total overflow in {}", currency))
            })?;
        }
        Ok(total)
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn total(&self) -> Decimal {
        round2(self.exact)
    }

    pub fn apply(&mut self, rates: &RateTable, delta: &BalanceDelta) -> FinanceResult<()> {
        let converted = rates.convert_exact(&delta.currency, &self.currency, delta.amount)?;
        self.exact = self.exact.checked_add(converted).ok_or_else(|| {
            FinanceError::InvalidInput(format!("total overflow in {}", self.currency))
        })?;
        Ok(())
    }

    /// Re-express the running total in `currency`.
    pub fn rebase(&mut self, rates: &RateTable, currency: &str) -> FinanceResult<()> {
        let exact = rates.convert_exact(&self.currency, currency, self.exact)?;
        self.currency = currency.to_string();
        self.exact = exact;
        Ok(())
    }
}

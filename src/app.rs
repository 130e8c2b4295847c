// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Application state and its mutation entry points.
//!
//! [`App`] owns the rate table, the account store and the aggregate total.
//! Every intent validates its currencies before touching the store, and a
//! store change whose delta cannot be added to the total is rolled back, so
//! a rejected intent changes nothing.

use log::debug;
use rust_decimal::Decimal;

use crate::dataset::Dataset;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{Account, BalanceDelta, TransactionKind};
use crate::rates::{RateTable, round2};
use crate::store::AccountStore;
use crate::totals::AggregateBalance;

#[derive(Debug, Clone)]
pub struct App {
    rates: RateTable,
    available: Vec<String>,
    store: AccountStore,
    total: AggregateBalance,
    dirty: bool,
}

impl App {
    pub fn new(
        rates: RateTable,
        available: Vec<String>,
        accounts: Vec<Account>,
        display_currency: &str,
    ) -> FinanceResult<Self> {
        for account in &accounts {
            rates.rate(&account.currency)?;
        }
        let total = AggregateBalance::recompute(&rates, &accounts, display_currency)?;
        debug!(
            "Loaded {} accounts, total {} {}",
            accounts.len(),
            total.total(),
            display_currency
        );
        Ok(Self {
            rates,
            available,
            store: AccountStore::new(accounts),
            total,
            dirty: false,
        })
    }

    /// Build from the bundled dataset and whatever was persisted. Stored
    /// accounts replace the seed accounts; a stored display currency is used
    /// only if the rate table still knows it.
    pub fn from_dataset(
        dataset: &Dataset,
        stored_accounts: Option<Vec<Account>>,
        stored_display: Option<String>,
    ) -> anyhow::Result<Self> {
        let rates = dataset.rate_table()?;
        let display = stored_display
            .filter(|c| rates.contains(c))
            .unwrap_or_else(|| dataset.currencies.base.clone());
        let accounts = stored_accounts.unwrap_or_else(|| dataset.accounts.clone());
        Ok(Self::new(
            rates,
            dataset.currencies.available.clone(),
            accounts,
            &display,
        )?)
    }

    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    pub fn available_currencies(&self) -> &[String] {
        &self.available
    }

    pub fn accounts(&self) -> &[Account] {
        self.store.accounts()
    }

    pub fn store(&self) -> &AccountStore {
        &self.store
    }

    pub fn account(&self, name: &str) -> Option<&Account> {
        self.store.find(name)
    }

    pub fn display_currency(&self) -> &str {
        self.total.currency()
    }

    pub fn total(&self) -> Decimal {
        self.total.total()
    }

    /// One account's balance in the display currency.
    pub fn converted_balance(&self, account: &Account) -> FinanceResult<Decimal> {
        self.rates
            .convert(&account.currency, self.display_currency(), account.balance)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    pub fn add_account(
        &mut self,
        name: &str,
        currency: &str,
        initial_balance: Decimal,
    ) -> FinanceResult<()> {
        self.rates.rate(currency)?;
        self.commit(|store| store.add_account(name, currency, initial_balance))
    }

    pub fn update_account(&mut self, name: &str, next: Account) -> FinanceResult<()> {
        self.rates.rate(&next.currency)?;
        self.commit(|store| store.update_account(name, next))
    }

    pub fn delete_account(&mut self, index: usize) -> FinanceResult<Account> {
        let mut removed = None;
        self.commit(|store| {
            let (account, delta) = store.delete_account(index)?;
            removed = Some(account);
            Ok(delta)
        })?;
        removed.ok_or_else(|| FinanceError::InvalidInput(format!("no account at {}", index)))
    }

    pub fn move_account(&mut self, from: usize, to: usize) -> FinanceResult<()> {
        self.store.move_account(from, to)?;
        debug!("Moved account {} -> {}", from, to);
        self.dirty = true;
        Ok(())
    }

    pub fn record_transaction(
        &mut self,
        name: &str,
        kind: TransactionKind,
        amount: Decimal,
        comment: &str,
    ) -> FinanceResult<()> {
        self.commit(|store| store.record_transaction(name, kind, amount, comment))
    }

    pub fn record_transaction_at(
        &mut self,
        name: &str,
        kind: TransactionKind,
        amount: Decimal,
        comment: &str,
        now_ms: i64,
    ) -> FinanceResult<()> {
        self.commit(|store| store.record_transaction_at(name, kind, amount, comment, now_ms))
    }

    pub fn delete_transaction(&mut self, name: &str, index: usize) -> FinanceResult<()> {
        self.commit(|store| store.delete_transaction(name, index))
    }

    pub fn set_display_currency(&mut self, currency: &str) -> FinanceResult<()> {
        if currency == self.display_currency() {
            return Ok(());
        }
        self.total.rebase(&self.rates, currency)?;
        debug!("Display currency now {}, total {}", currency, self.total());
        self.dirty = true;
        Ok(())
    }

    /// Total computed from scratch over the current accounts.
    pub fn recomputed_total(&self) -> FinanceResult<Decimal> {
        AggregateBalance::recompute(&self.rates, self.accounts(), self.display_currency())
            .map(|t| t.total())
    }

    /// Accounts whose cached balance disagrees with their transactions.
    pub fn inconsistent_accounts(&self) -> Vec<&Account> {
        self.accounts()
            .iter()
            .filter(|a| !a.is_consistent())
            .collect()
    }

    /// Run one store operation and fold its delta into the total. If the
    /// total cannot absorb the delta the store is restored.
    fn commit<F>(&mut self, op: F) -> FinanceResult<()>
    where
        F: FnOnce(&mut AccountStore) -> FinanceResult<BalanceDelta>,
    {
        let before = self.store.clone();
        let delta = op(&mut self.store)?;
        if let Err(e) = self.total.apply(&self.rates, &delta) {
            debug!("Rolled back {} {}: {}", round2(delta.amount), delta.currency, e);
            self.store = before;
            return Err(e);
        }
        debug!(
            "Applied {} {} -> total {} {}",
            round2(delta.amount),
            delta.currency,
            self.total(),
            self.display_currency()
        );
        self.dirty = true;
        Ok(())
    }
}

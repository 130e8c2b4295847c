// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Ordered account collection.
//!
//! Every balance-affecting operation returns the change it caused as a
//! [`BalanceDelta`] in the account's own currency, so the caller can keep an
//! aggregate total in step without rescanning the collection. An operation
//! that fails leaves the collection unchanged.

use chrono::Utc;
use rust_decimal::Decimal;

use crate::error::{FinanceError, FinanceResult};
use crate::models::{Account, AccountId, BalanceDelta, Transaction, TransactionKind};
use crate::rates::round2;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccountStore {
    accounts: Vec<Account>,
}

impl AccountStore {
    pub fn new(accounts: Vec<Account>) -> Self {
        Self { accounts }
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn into_accounts(self) -> Vec<Account> {
        self.accounts
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Account> {
        self.accounts.get(index)
    }

    /// First account with this name, ignoring surrounding whitespace.
    pub fn find(&self, name: &str) -> Option<&Account> {
        self.position(name).map(|i| &self.accounts[i])
    }

    pub fn find_by_id(&self, id: AccountId) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == id)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        let name = name.trim();
        self.accounts.iter().position(|a| a.name.trim() == name)
    }

    pub fn add_account(
        &mut self,
        name: &str,
        currency: &str,
        initial_balance: Decimal,
    ) -> FinanceResult<BalanceDelta> {
        let name = name.trim();
        if name.is_empty() {
            return Err(FinanceError::InvalidInput(
                "account name must not be empty".into(),
            ));
        }
        if self.find(name).is_some() {
            return Err(FinanceError::DuplicateAccount(name.to_string()));
        }
        let account = Account::new(name, currency, initial_balance);
        let delta = BalanceDelta::new(&account.currency, account.balance);
        self.accounts.push(account);
        Ok(delta)
    }

    /// Replace the account named `name` in place with `next`.
    pub fn update_account(&mut self, name: &str, next: Account) -> FinanceResult<BalanceDelta> {
        let index = self
            .position(name)
            .ok_or_else(|| FinanceError::AccountNotFound(name.to_string()))?;
        let current = &self.accounts[index];
        if next.name != current.name {
            return Err(FinanceError::InvalidInput(format!(
                "cannot rename '{}' to '{}' through an update",
                current.name, next.name
            )));
        }
        if next.currency != current.currency {
            return Err(FinanceError::InvalidInput(format!(
                "cannot change the currency of '{}' from {} to {}",
                current.name, current.currency, next.currency
            )));
        }
        let change = next
            .balance
            .checked_sub(current.balance)
            .ok_or_else(|| balance_out_of_range(&current.name))?;
        let delta = BalanceDelta::new(&next.currency, change);
        self.accounts[index] = next;
        Ok(delta)
    }

    pub fn delete_account(&mut self, index: usize) -> FinanceResult<(Account, BalanceDelta)> {
        if index >= self.accounts.len() {
            return Err(out_of_range("account", index, self.accounts.len()));
        }
        let removed = self.accounts.remove(index);
        let delta = BalanceDelta::new(&removed.currency, -removed.balance);
        Ok((removed, delta))
    }

    /// Relocate one account. `to == len()` moves it to the end.
    pub fn move_account(&mut self, from: usize, to: usize) -> FinanceResult<()> {
        let len = self.accounts.len();
        if from >= len {
            return Err(out_of_range("account", from, len));
        }
        if to > len {
            return Err(out_of_range("target position", to, len));
        }
        let account = self.accounts.remove(from);
        let to = to.min(self.accounts.len());
        self.accounts.insert(to, account);
        Ok(())
    }

    pub fn record_transaction(
        &mut self,
        name: &str,
        kind: TransactionKind,
        amount: Decimal,
        comment: &str,
    ) -> FinanceResult<BalanceDelta> {
        let now = Utc::now().timestamp_millis();
        self.record_transaction_at(name, kind, amount, comment, now)
    }

    /// Like [`record_transaction`](Self::record_transaction) with an explicit
    /// clock reading in milliseconds. The stored date is bumped past the
    /// account's newest transaction so dates stay unique and ordered.
    pub fn record_transaction_at(
        &mut self,
        name: &str,
        kind: TransactionKind,
        amount: Decimal,
        comment: &str,
        now_ms: i64,
    ) -> FinanceResult<BalanceDelta> {
        if amount < Decimal::ZERO {
            return Err(FinanceError::InvalidInput(format!(
                "amount must not be negative, got {}",
                amount
            )));
        }
        let current = self
            .find(name)
            .ok_or_else(|| FinanceError::AccountNotFound(name.to_string()))?;

        let amount = round2(amount);
        let date = match current.newest_date() {
            Some(newest) if newest >= now_ms => newest + 1,
            _ => now_ms,
        };
        let tx = Transaction {
            kind,
            amount,
            comment: comment.to_string(),
            date,
        };

        let mut next = current.clone();
        next.balance = next
            .balance
            .checked_add(tx.signed_amount())
            .ok_or_else(|| balance_out_of_range(&current.name))?;
        next.transactions.insert(0, tx);
        self.update_account(name, next)
    }

    pub fn delete_transaction(&mut self, name: &str, index: usize) -> FinanceResult<BalanceDelta> {
        let current = self
            .find(name)
            .ok_or_else(|| FinanceError::AccountNotFound(name.to_string()))?;
        if index >= current.transactions.len() {
            return Err(out_of_range("transaction", index, current.transactions.len()));
        }

        let mut next = current.clone();
        let removed = next.transactions.remove(index);
        next.balance = next
            .balance
            .checked_sub(removed.signed_amount())
            .ok_or_else(|| balance_out_of_range(&current.name))?;
        self.update_account(name, next)
    }
}

fn balance_out_of_range(name: &str) -> FinanceError {
    FinanceError::InvalidInput(format!("balance of '{}' is out of range", name))
}

fn out_of_range(what: &str, index: usize, len: usize) -> FinanceError {
    FinanceError::InvalidInput(format!(
        "{} index {} out of range (have {})",
        what, index, len
    ))
}

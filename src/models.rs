// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId(Uuid);

impl AccountId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    #[serde(rename = "expenses")]
    Expense,
    #[serde(rename = "income")]
    Income,
}

impl TransactionKind {
    pub fn sign(self) -> Decimal {
        match self {
            TransactionKind::Expense => Decimal::NEGATIVE_ONE,
            TransactionKind::Income => Decimal::ONE,
        }
    }

    /// Contribution of `amount` to an account balance.
    pub fn signed(self, amount: Decimal) -> Decimal {
        self.sign() * amount
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TransactionKind::Expense => "expenses",
            TransactionKind::Income => "income",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: Decimal,
    #[serde(default)]
    pub comment: String,
    /// Creation time in milliseconds since the Unix epoch; unique within its account.
    pub date: i64,
}

impl Transaction {
    pub fn signed_amount(&self) -> Decimal {
        self.kind.signed(self.amount)
    }
}

/// An account and its transactions, newest first.
///
/// `balance` is a cached value; it always equals `opening_balance` plus the
/// signed sum of `transactions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AccountRecord", into = "AccountRecord")]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    pub currency: String,
    pub balance: Decimal,
    pub opening_balance: Decimal,
    /// Set when the snapshot carried no `opening` and it was derived from
    /// the balance, which makes the balance invariant hold by construction.
    pub opening_inferred: bool,
    pub transactions: Vec<Transaction>,
}

impl Account {
    pub fn new(name: &str, currency: &str, initial_balance: Decimal) -> Self {
        Self {
            id: AccountId::new(),
            name: name.to_string(),
            currency: currency.to_string(),
            balance: initial_balance,
            opening_balance: initial_balance,
            opening_inferred: false,
            transactions: Vec::new(),
        }
    }

    /// Signed sum of the transactions, `None` past the `Decimal` range.
    pub fn transactions_sum(&self) -> Option<Decimal> {
        signed_sum(&self.transactions)
    }

    /// Balance regenerated from the opening balance and the transaction list.
    pub fn computed_balance(&self) -> Option<Decimal> {
        self.opening_balance.checked_add(self.transactions_sum()?)
    }

    pub fn is_consistent(&self) -> bool {
        self.computed_balance() == Some(self.balance)
    }

    pub fn newest_date(&self) -> Option<i64> {
        self.transactions.iter().map(|t| t.date).max()
    }
}

// Stored shape of an account. `opening` is absent in snapshots written before
// opening balances were tracked; it is then inferred from the balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountRecord {
    name: String,
    currency: String,
    balance: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    opening: Option<Decimal>,
    #[serde(default)]
    transactions: Vec<Transaction>,
}

fn signed_sum(transactions: &[Transaction]) -> Option<Decimal> {
    transactions
        .iter()
        .try_fold(Decimal::ZERO, |acc, t| acc.checked_add(t.signed_amount()))
}

impl TryFrom<AccountRecord> for Account {
    type Error = String;

    fn try_from(r: AccountRecord) -> Result<Self, Self::Error> {
        let (opening_balance, opening_inferred) = match r.opening {
            Some(opening) => (opening, false),
            None => {
                let inferred = signed_sum(&r.transactions)
                    .and_then(|sum| r.balance.checked_sub(sum))
                    .ok_or_else(|| format!("transactions of '{}' are out of range", r.name))?;
                (inferred, true)
            }
        };
        Ok(Self {
            id: AccountId::new(),
            name: r.name,
            currency: r.currency,
            balance: r.balance,
            opening_balance,
            opening_inferred,
            transactions: r.transactions,
        })
    }
}

impl From<Account> for AccountRecord {
    fn from(a: Account) -> Self {
        let opening = if a.opening_balance.is_zero() {
            None
        } else {
            Some(a.opening_balance)
        };
        Self {
            name: a.name,
            currency: a.currency,
            balance: a.balance,
            opening,
            transactions: a.transactions,
        }
    }
}

/// Change of one account's balance, in that account's currency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceDelta {
    pub currency: String,
    pub amount: Decimal,
}

impl BalanceDelta {
    pub fn new(currency: &str, amount: Decimal) -> Self {
        Self {
            currency: currency.to_string(),
            amount,
        }
    }
}

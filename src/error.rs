// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Errors raised by the rate table, the account store and the controller.
///
/// Any operation returning one of these leaves its state untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FinanceError {
    #[error("unknown currency '{0}'")]
    UnknownCurrency(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("account '{0}' already exists")]
    DuplicateAccount(String),
    #[error("account '{0}' not found")]
    AccountNotFound(String),
}

pub type FinanceResult<T> = std::result::Result<T, FinanceError>;

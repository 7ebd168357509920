//! Typed records describing an account statement as read from JSON.
//!
//! Every struct uses `#[serde(default)]`, so missing fields fall back to empty
//! strings and zero amounts while unknown fields are ignored.  No validation is
//! performed: money in/out totals are not reconciled with balances and
//! transaction dates are kept in input order.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::amount::Amount;

/// One ledger line of the statement.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transaction {
    pub date: String,
    pub description: String,
    pub money_out: Amount,
    pub money_in: Amount,
    pub balance: Amount,
}

/// Opening/closing balance and period totals of a single product.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalanceSummary {
    pub product: String,
    pub opening_balance: Amount,
    pub closing_balance: Amount,
    pub money_in: Amount,
    pub money_out: Amount,
}

/// Aggregate root of a statement document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountStatement {
    pub company_name: String,
    pub company_address: String,
    pub customer_name: String,
    pub customer_address: String,
    pub account_name: String,
    pub account_number: String,
    pub report_generation_date: String,
    pub balance_summary: Vec<BalanceSummary>,
    pub transactions: Vec<Transaction>,
}

impl AccountStatement {
    /// Sums the money in and money out columns of the transaction list.
    ///
    /// The totals are informational; the provided balance summary stays the
    /// authoritative source for what is rendered.
    pub fn transaction_totals(&self) -> StatementTotals {
        self.transactions
            .iter()
            .fold(StatementTotals::default(), |mut totals, transaction| {
                totals.money_in += transaction.money_in.value().unwrap_or_default();
                totals.money_out += transaction.money_out.value().unwrap_or_default();
                totals
            })
    }
}

/// Money flowing in and out of the account across all transactions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatementTotals {
    pub money_in: Decimal,
    pub money_out: Decimal,
}

impl StatementTotals {
    /// Net change in balance implied by the totals.
    pub fn net(&self) -> Decimal {
        self.money_in - self.money_out
    }
}

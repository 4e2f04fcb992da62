//! This file defines the type `Transaction`, the core record of the tracker.

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::record_id::RecordId;

/// The category choices offered for expense transactions.
///
/// These are suggestions for the embedding application's forms; the ledger
/// accepts any category text so that old records survive a changed list.
pub const EXPENSE_CATEGORIES: [&str; 7] = [
    "Food",
    "Transportation",
    "Entertainment",
    "Shopping",
    "Bills",
    "Healthcare",
    "Other",
];

/// The category choices offered for income transactions.
pub const INCOME_CATEGORIES: [&str; 5] = ["Salary", "Freelance", "Investment", "Gift", "Other"];

/// Whether a transaction brought money in or spent it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money earned.
    Income,
    /// Money spent.
    Expense,
}

/// An expense or income, i.e. an event where money was either spent or
/// earned.
///
/// Transactions are created through [crate::Ledger::add_transaction] and are
/// immutable once created; the only way to change history is to delete a
/// record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: RecordId,
    /// Whether this is income or an expense.
    pub kind: TransactionKind,
    /// The amount of money spent or earned in this transaction.
    pub amount: f64,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The category that describes the type of the transaction.
    ///
    /// A soft reference: budget categories match expenses by comparing this
    /// string against their name.
    pub category: String,
    /// When the transaction happened.
    pub date: Date,
    /// When the record was created.
    pub created_at: OffsetDateTime,
}

//! The dashboard numbers: current-period totals, category breakdowns, and
//! the filtered transaction list.

use std::collections::HashMap;

use time::Date;

use crate::{
    models::{Goal, Transaction, TransactionKind},
    period::{DateRange, RecencyWindow, month_of},
};

use super::goal::total_savings;

/// The headline dashboard figures for the calendar month containing
/// "today".
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodSummary {
    /// Income recorded this month.
    pub income: f64,
    /// Expenses recorded this month.
    pub expenses: f64,
    /// Income minus expenses.
    pub balance: f64,
    /// Money saved across all goals, regardless of period.
    pub total_savings: f64,
}

impl PeriodSummary {
    /// Compute the summary for the calendar month containing `today`.
    pub fn for_month_of(transactions: &[Transaction], goals: &[Goal], today: Date) -> Self {
        let month = month_of(today);
        let mut income = 0.0;
        let mut expenses = 0.0;

        for transaction in transactions
            .iter()
            .filter(|transaction| month.contains(transaction.date))
        {
            match transaction.kind {
                TransactionKind::Income => income += transaction.amount,
                TransactionKind::Expense => expenses += transaction.amount,
            }
        }

        Self {
            income,
            expenses,
            balance: income - expenses,
            total_savings: total_savings(goals),
        }
    }
}

/// An expense total for one category, as used by the dashboard chart and
/// the report breakdowns.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    /// The category text the expenses were recorded under.
    pub category: String,
    /// The summed expense amounts.
    pub total: f64,
}

/// Sum the expense transactions within `range` by category.
///
/// The totals are sorted by descending amount (ties broken by name) so the
/// output is deterministic regardless of insertion order. Every category
/// string found on an expense appears, whether or not a budget category of
/// that name exists.
pub fn category_breakdown(transactions: &[Transaction], range: DateRange) -> Vec<CategoryTotal> {
    let mut totals: HashMap<&str, f64> = HashMap::new();

    for transaction in transactions.iter().filter(|transaction| {
        transaction.kind == TransactionKind::Expense && range.contains(transaction.date)
    }) {
        *totals.entry(transaction.category.as_str()).or_insert(0.0) += transaction.amount;
    }

    let mut breakdown: Vec<CategoryTotal> = totals
        .into_iter()
        .map(|(category, total)| CategoryTotal {
            category: category.to_owned(),
            total,
        })
        .collect();
    breakdown.sort_by(|a, b| {
        b.total
            .total_cmp(&a.total)
            .then_with(|| a.category.cmp(&b.category))
    });

    breakdown
}

/// The transaction list as shown on the transactions page: optionally
/// restricted to one kind, and to a recency window relative to `today`.
///
/// Order is preserved, so the result stays newest first.
pub fn filter_transactions<'a>(
    transactions: &'a [Transaction],
    kind: Option<TransactionKind>,
    window: RecencyWindow,
    today: Date,
) -> Vec<&'a Transaction> {
    transactions
        .iter()
        .filter(|transaction| kind.is_none_or(|kind| transaction.kind == kind))
        .filter(|transaction| window.contains(transaction.date, today))
        .collect()
}

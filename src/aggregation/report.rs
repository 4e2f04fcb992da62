//! Monthly and yearly report payloads.

use time::Month;

use crate::{
    models::{Transaction, TransactionKind},
    period::{DateRange, month_abbrev, month_bounds, month_from_number, year_bounds},
};

use super::summary::{CategoryTotal, category_breakdown};

/// The report for one calendar month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyReport {
    /// The year the report covers.
    pub year: i32,
    /// The month the report covers.
    pub month: Month,
    /// Income recorded in the month.
    pub income: f64,
    /// Expenses recorded in the month.
    pub expenses: f64,
    /// Income minus expenses.
    pub balance: f64,
    /// Expense totals by category, largest first.
    pub category_breakdown: Vec<CategoryTotal>,
    /// How many transactions fell in the month.
    pub transaction_count: usize,
}

/// One month's line in a yearly report's breakdown.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthBreakdown {
    /// Which month of the year this line covers.
    pub month: Month,
    /// Income recorded in the month.
    pub income: f64,
    /// Expenses recorded in the month.
    pub expenses: f64,
    /// Income minus expenses.
    pub balance: f64,
}

impl MonthBreakdown {
    /// The month as a three-letter label, e.g. "Jan".
    pub fn label(&self) -> &'static str {
        month_abbrev(self.month)
    }
}

/// The report for one calendar year.
#[derive(Debug, Clone, PartialEq)]
pub struct YearlyReport {
    /// The year the report covers.
    pub year: i32,
    /// Income recorded in the year.
    pub income: f64,
    /// Expenses recorded in the year.
    pub expenses: f64,
    /// Income minus expenses.
    pub balance: f64,
    /// One line per month, January through December, always 12 entries.
    pub monthly_breakdown: Vec<MonthBreakdown>,
    /// Expense totals by category, largest first.
    pub category_breakdown: Vec<CategoryTotal>,
    /// How many transactions fell in the year.
    pub transaction_count: usize,
}

/// Build the report for the given calendar month.
///
/// A month with no transactions reports all sums as zero and an empty
/// breakdown.
pub fn monthly_report(transactions: &[Transaction], year: i32, month: Month) -> MonthlyReport {
    let range = month_bounds(year, month);
    let (income, expenses, transaction_count) = totals_in(transactions, range);

    MonthlyReport {
        year,
        month,
        income,
        expenses,
        balance: income - expenses,
        category_breakdown: category_breakdown(transactions, range),
        transaction_count,
    }
}

/// Build the report for the given calendar year, including the 12-entry
/// per-month breakdown.
pub fn yearly_report(transactions: &[Transaction], year: i32) -> YearlyReport {
    let range = year_bounds(year);
    let (income, expenses, transaction_count) = totals_in(transactions, range);

    let monthly_breakdown = (1..=12)
        .map(|number| {
            let month = month_from_number(number);
            let (income, expenses, _) = totals_in(transactions, month_bounds(year, month));

            MonthBreakdown {
                month,
                income,
                expenses,
                balance: income - expenses,
            }
        })
        .collect();

    YearlyReport {
        year,
        income,
        expenses,
        balance: income - expenses,
        monthly_breakdown,
        category_breakdown: category_breakdown(transactions, range),
        transaction_count,
    }
}

fn totals_in(transactions: &[Transaction], range: DateRange) -> (f64, f64, usize) {
    let mut income = 0.0;
    let mut expenses = 0.0;
    let mut count = 0;

    for transaction in transactions
        .iter()
        .filter(|transaction| range.contains(transaction.date))
    {
        match transaction.kind {
            TransactionKind::Income => income += transaction.amount,
            TransactionKind::Expense => expenses += transaction.amount,
        }
        count += 1;
    }

    (income, expenses, count)
}

//! Budget spend recomputation.

use time::Date;

use crate::{
    models::{BudgetCategory, Transaction, TransactionKind},
    period::month_of,
};

use super::progress::Progress;

/// A budget category together with its recomputed current-month spend.
///
/// `spent` is a projection, never stored: it is re-derived from the
/// transaction list on every call to [budget_statuses], so deleting a
/// transaction is immediately reflected and the persisted snapshot can
/// never go stale.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetStatus {
    /// The budget category the status was computed for.
    pub category: BudgetCategory,
    /// The summed current-month expenses whose category text equals the
    /// budget's name.
    pub spent: f64,
    /// Spend as a percentage of the limit.
    pub progress: Progress,
}

impl BudgetStatus {
    /// Whether more than the limit has been spent this month.
    pub fn is_over_budget(&self) -> bool {
        self.spent > self.category.limit
    }

    /// How far over the limit this month's spending is, or zero when the
    /// budget is not exceeded.
    pub fn overage(&self) -> f64 {
        (self.spent - self.category.limit).max(0.0)
    }
}

/// Recompute every budget's spend from the current month's expense
/// transactions.
///
/// Expenses count towards a budget when their category text equals the
/// budget's name. The match is a soft reference: expenses whose category
/// matches no budget are simply excluded from every spend total, and
/// renaming or deleting a budget silently orphans its expenses. Every call
/// recomputes from scratch, O(transactions × categories).
pub fn budget_statuses(
    budgets: &[BudgetCategory],
    transactions: &[Transaction],
    today: Date,
) -> Vec<BudgetStatus> {
    let month = month_of(today);
    let this_month_expenses: Vec<&Transaction> = transactions
        .iter()
        .filter(|transaction| {
            transaction.kind == TransactionKind::Expense && month.contains(transaction.date)
        })
        .collect();

    budgets
        .iter()
        .map(|budget| {
            let spent = this_month_expenses
                .iter()
                .filter(|transaction| transaction.category == budget.name)
                .map(|transaction| transaction.amount)
                .sum();

            BudgetStatus {
                category: budget.clone(),
                spent,
                progress: Progress::ratio(spent, budget.limit),
            }
        })
        .collect()
}

#[cfg(test)]
mod budget_tests {
    use time::macros::{date, datetime};

    use crate::{
        aggregation::Progress,
        models::{BudgetCategory, Transaction, TransactionKind},
    };

    use super::budget_statuses;

    fn expense(id: i64, amount: f64, category: &str, date: time::Date) -> Transaction {
        Transaction {
            id,
            kind: TransactionKind::Expense,
            amount,
            description: String::new(),
            category: category.to_owned(),
            date,
            created_at: datetime!(2024-01-01 00:00 UTC),
        }
    }

    fn budget(id: i64, name: &str, limit: f64) -> BudgetCategory {
        BudgetCategory {
            id,
            name: name.to_owned(),
            limit,
        }
    }

    #[test]
    fn spent_sums_matching_current_month_expenses() {
        let today = date!(2024 - 03 - 20);
        let budgets = vec![budget(1, "Food", 1000.0)];
        let transactions = vec![
            expense(1, 700.0, "Food", date!(2024 - 03 - 05)),
            expense(2, 500.0, "Food", date!(2024 - 03 - 15)),
            expense(3, 200.0, "Bills", date!(2024 - 03 - 10)),
            expense(4, 999.0, "Food", date!(2024 - 02 - 15)),
        ];

        let statuses = budget_statuses(&budgets, &transactions, today);

        assert_eq!(statuses[0].spent, 1200.0);
    }

    #[test]
    fn over_budget_scenario_reports_overage() {
        let today = date!(2024 - 03 - 20);
        let budgets = vec![budget(1, "Food", 1000.0)];
        let transactions = vec![expense(1, 1200.0, "Food", date!(2024 - 03 - 15))];

        let statuses = budget_statuses(&budgets, &transactions, today);

        assert_eq!(statuses[0].spent, 1200.0);
        assert!(statuses[0].is_over_budget());
        assert_eq!(statuses[0].overage(), 200.0);
        assert_eq!(statuses[0].progress, Progress::Percent(120.0));
    }

    #[test]
    fn under_budget_has_no_overage() {
        let today = date!(2024 - 03 - 20);
        let budgets = vec![budget(1, "Food", 1000.0)];
        let transactions = vec![expense(1, 400.0, "Food", date!(2024 - 03 - 15))];

        let statuses = budget_statuses(&budgets, &transactions, today);

        assert!(!statuses[0].is_over_budget());
        assert_eq!(statuses[0].overage(), 0.0);
    }

    #[test]
    fn spent_is_independent_of_insertion_order() {
        let today = date!(2024 - 03 - 20);
        let budgets = vec![budget(1, "Food", 1000.0)];
        let forwards = vec![
            expense(1, 700.0, "Food", date!(2024 - 03 - 05)),
            expense(2, 500.0, "Food", date!(2024 - 03 - 15)),
        ];
        let backwards: Vec<_> = forwards.iter().rev().cloned().collect();

        let spent_forwards = budget_statuses(&budgets, &forwards, today)[0].spent;
        let spent_backwards = budget_statuses(&budgets, &backwards, today)[0].spent;

        assert_eq!(spent_forwards, spent_backwards);
    }

    #[test]
    fn income_never_counts_against_a_budget() {
        let today = date!(2024 - 03 - 20);
        let budgets = vec![budget(1, "Other", 100.0)];
        let transactions = vec![Transaction {
            id: 1,
            kind: TransactionKind::Income,
            amount: 5000.0,
            description: String::new(),
            category: "Other".to_owned(),
            date: date!(2024 - 03 - 01),
            created_at: datetime!(2024-01-01 00:00 UTC),
        }];

        let statuses = budget_statuses(&budgets, &transactions, today);

        assert_eq!(statuses[0].spent, 0.0);
    }

    #[test]
    fn unmatched_expense_categories_count_towards_no_budget() {
        let today = date!(2024 - 03 - 20);
        let budgets = vec![budget(1, "Food", 1000.0)];
        let transactions = vec![expense(1, 300.0, "Groceries", date!(2024 - 03 - 05))];

        let statuses = budget_statuses(&budgets, &transactions, today);

        assert_eq!(statuses[0].spent, 0.0);
    }

    #[test]
    fn zero_limit_yields_undefined_progress() {
        let today = date!(2024 - 03 - 20);
        let budgets = vec![BudgetCategory {
            id: 1,
            name: "Food".to_owned(),
            limit: 0.0,
        }];
        let transactions = vec![expense(1, 50.0, "Food", date!(2024 - 03 - 05))];

        let statuses = budget_statuses(&budgets, &transactions, today);

        assert_eq!(statuses[0].progress, Progress::Undefined);
        assert_eq!(statuses[0].progress.clamped_percent(), 0.0);
    }

    #[test]
    fn budget_with_no_transactions_spends_nothing() {
        let statuses = budget_statuses(
            &[budget(1, "Food", 1000.0)],
            &[],
            date!(2024 - 03 - 20),
        );

        assert_eq!(statuses[0].spent, 0.0);
        assert_eq!(statuses[0].progress, Progress::Percent(0.0));
    }
}

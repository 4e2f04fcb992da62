//! This file defines the type `BudgetCategory`, a named monthly spending
//! limit.

use serde::{Deserialize, Serialize};

use crate::record_id::RecordId;

/// A named spending limit, e.g. at most $400 on "Food" per month.
///
/// How much has actually been spent against the limit is a derived value,
/// never stored: see [crate::aggregation::BudgetStatus], which recomputes
/// the spend from the current month's expense transactions on every read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetCategory {
    /// The ID of the budget category.
    pub id: RecordId,
    /// The category name, matched against expense transactions' category
    /// text.
    pub name: String,
    /// The monthly spending limit.
    pub limit: f64,
}

//! This file defines the type `Goal`, a savings target with a deadline.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::record_id::RecordId;

/// A savings goal: a target amount to put aside before a deadline.
///
/// Unlike a budget category's spend, `current` is authoritative state: it
/// is only changed by explicit deposits through
/// [crate::Ledger::deposit_to_goal] and is persisted with the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    /// The ID of the goal.
    pub id: RecordId,
    /// What the money is being saved for.
    pub name: String,
    /// The amount to save.
    pub target: f64,
    /// The amount saved so far.
    pub current: f64,
    /// The date the target should be reached by.
    pub deadline: Date,
}

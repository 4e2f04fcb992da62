//! Goal progress computation.

use time::Date;

use crate::models::Goal;

use super::progress::Progress;

/// A goal's progress towards its target as of a given day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoalProgress {
    /// Saved amount as a percentage of the target, uncapped.
    pub percent: Progress,
    /// Whole days until the deadline. Zero means the deadline is today;
    /// negative means it has already passed.
    pub days_remaining: i64,
}

impl GoalProgress {
    /// Whether the deadline is today or already behind us.
    pub fn deadline_passed(&self) -> bool {
        self.days_remaining <= 0
    }
}

/// Compute a goal's progress as of `today`.
pub fn goal_progress(goal: &Goal, today: Date) -> GoalProgress {
    GoalProgress {
        percent: Progress::ratio(goal.current, goal.target),
        days_remaining: (goal.deadline - today).whole_days(),
    }
}

/// The total amount saved across all goals.
pub fn total_savings(goals: &[Goal]) -> f64 {
    goals.iter().map(|goal| goal.current).sum()
}

//! Guarded percentage values for budget and goal progress.

/// How far along something is towards its limit or target.
///
/// Dividing by a zero limit or target does not produce infinity or NaN;
/// it produces [Progress::Undefined], which callers render as "N/A" (or
/// 0%) instead of letting a non-finite number leak into display code.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Progress {
    /// The percentage of the limit or target used, uncapped: 150.0 means
    /// half as much again as was planned.
    Percent(f64),
    /// Progress cannot be computed because the limit or target is zero.
    Undefined,
}

impl Progress {
    /// Compute `amount` as a percentage of `whole`.
    ///
    /// Returns [Progress::Undefined] when `whole` is zero.
    pub fn ratio(amount: f64, whole: f64) -> Self {
        if whole == 0.0 {
            Progress::Undefined
        } else {
            Progress::Percent(amount / whole * 100.0)
        }
    }

    /// The percentage clamped to `0.0..=100.0` for progress-bar widths.
    ///
    /// [Progress::Undefined] clamps to zero.
    pub fn clamped_percent(self) -> f64 {
        match self {
            Progress::Percent(percent) => percent.clamp(0.0, 100.0),
            Progress::Undefined => 0.0,
        }
    }

    /// Whether the percentage exceeds 100.
    pub fn is_over(self) -> bool {
        matches!(self, Progress::Percent(percent) if percent > 100.0)
    }
}

//! Calendar-period helpers shared by the aggregation functions.

use time::{Date, Duration, Month};

/// An inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    /// The first date in the range.
    pub start: Date,
    /// The last date in the range.
    pub end: Date,
}

impl DateRange {
    /// Whether `date` falls within the range, inclusive of both ends.
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }
}

/// The recency presets the transaction list can be filtered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecencyWindow {
    /// Transactions dated within the last 7 days.
    Last7Days,
    /// Transactions dated within the last 30 days.
    Last30Days,
    /// No recency filter.
    #[default]
    AllTime,
}

impl RecencyWindow {
    /// The earliest date admitted by the window, relative to `today`, or
    /// `None` when the window is unbounded.
    pub fn start_date(self, today: Date) -> Option<Date> {
        match self {
            RecencyWindow::Last7Days => Some(today - Duration::days(7)),
            RecencyWindow::Last30Days => Some(today - Duration::days(30)),
            RecencyWindow::AllTime => None,
        }
    }

    /// Whether a transaction dated `date` falls inside the window as seen
    /// from `today`.
    pub fn contains(self, date: Date, today: Date) -> bool {
        match self.start_date(today) {
            Some(start) => date >= start,
            None => true,
        }
    }
}

/// The full calendar month containing `year`/`month`.
pub fn month_bounds(year: i32, month: Month) -> DateRange {
    let start = Date::from_calendar_date(year, month, 1).expect("invalid month start date");
    let end = Date::from_calendar_date(year, month, last_day_of_month(year, month))
        .expect("invalid month end date");

    DateRange { start, end }
}

/// The full calendar year `year`.
pub fn year_bounds(year: i32) -> DateRange {
    DateRange {
        start: Date::from_calendar_date(year, Month::January, 1).expect("invalid year start date"),
        end: Date::from_calendar_date(year, Month::December, 31).expect("invalid year end date"),
    }
}

/// The calendar month containing `date`.
pub fn month_of(date: Date) -> DateRange {
    month_bounds(date.year(), date.month())
}

pub(crate) fn last_day_of_month(year: i32, month: Month) -> u8 {
    match month {
        Month::January
        | Month::March
        | Month::May
        | Month::July
        | Month::August
        | Month::October
        | Month::December => 31,
        Month::April | Month::June | Month::September | Month::November => 30,
        Month::February => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

pub(crate) fn month_from_number(month: u8) -> Month {
    match month {
        1 => Month::January,
        2 => Month::February,
        3 => Month::March,
        4 => Month::April,
        5 => Month::May,
        6 => Month::June,
        7 => Month::July,
        8 => Month::August,
        9 => Month::September,
        10 => Month::October,
        11 => Month::November,
        12 => Month::December,
        _ => panic!("invalid month number {month}"),
    }
}

pub(crate) fn month_abbrev(month: Month) -> &'static str {
    match month {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    }
}

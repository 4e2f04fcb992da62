//! Pocketbook is a personal finance tracker core: income and expense
//! transactions, budget categories with derived spending, and savings goals,
//! persisted as JSON snapshots in a key-value storage medium.
//!
//! This library owns the records and the numbers; rendering them is the
//! embedding application's job. The three entry points are:
//!
//! - [Ledger], which loads the record lists from a [KeyValueStore],
//!   exposes them by reference, and applies every mutation followed by a
//!   write-through persist.
//! - The [aggregation] module, pure functions that derive dashboard
//!   summaries, budget spend, goal progress, and monthly/yearly reports
//!   from the ledger's lists.
//! - [SqliteStore] and [MemoryStore], the storage media.

#![warn(missing_docs)]

pub mod aggregation;
mod currency;
mod ledger;
mod logging;
mod models;
mod period;
mod record_id;
mod storage;
mod timezone;

pub use currency::format_currency;
pub use ledger::Ledger;
pub use logging::init_logging;
pub use models::{
    BudgetCategory, EXPENSE_CATEGORIES, Goal, INCOME_CATEGORIES, Transaction, TransactionKind,
};
pub use period::{DateRange, RecencyWindow};
pub use record_id::{IdGenerator, RecordId};
pub use storage::{KeyValueStore, MemoryStore, SCHEMA_VERSION, SqliteStore, keys};
pub use timezone::local_today;

/// The errors that may occur in the finance tracker core.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An amount, limit, or target was not a finite number greater than zero.
    ///
    /// Amounts are validated at the mutation boundary so that NaN or
    /// infinity can never enter the record lists and taint every sum
    /// derived from them.
    #[error("{0} is not a valid amount, expected a finite number greater than zero")]
    InvalidAmount(f64),

    /// A negative amount was passed to a goal deposit.
    ///
    /// Goals only accumulate money; there is no withdrawal operation, so a
    /// negative deposit is treated as malformed input rather than silently
    /// reducing the saved total.
    #[error("cannot deposit the negative amount {0} to a goal")]
    NegativeDeposit(f64),

    /// An empty string was used as a budget category or goal name.
    #[error("name cannot be empty")]
    EmptyName,

    /// The persisted snapshot was written by a newer schema than this
    /// library understands.
    #[error("unsupported storage schema version {0}")]
    UnsupportedSchemaVersion(u32),

    /// A record list could not be serialized to or deserialized from its
    /// JSON snapshot.
    #[error("could not (de)serialize records as JSON: {0}")]
    Serialization(String),

    /// An unhandled error from the underlying SQLite storage medium.
    #[error("an unexpected SQL error occurred: {0}")]
    Sql(rusqlite::Error),

    /// The configured canonical timezone name is unknown.
    #[error("invalid timezone {0}")]
    InvalidTimezone(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        tracing::error!("an unhandled SQL error occurred: {value}");
        Error::Sql(value)
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Error::Serialization(value.to_string())
    }
}

//! The key-value storage media that record snapshots are persisted to.
//!
//! The ledger does not care where its snapshots live; it writes serialized
//! text under the fixed keys in [keys] through the [KeyValueStore] trait.
//! [SqliteStore] is the durable medium, [MemoryStore] backs tests and
//! throwaway ledgers.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::Error;

/// The version of the persisted snapshot layout.
///
/// Written under [keys::SCHEMA_VERSION] the first time a ledger touches a
/// store, and checked on every load so that a future layout change can
/// migrate old snapshots instead of misreading them.
pub const SCHEMA_VERSION: u32 = 1;

/// The fixed keys that record snapshots are stored under.
pub mod keys {
    /// The snapshot layout version, as decimal integer text.
    pub const SCHEMA_VERSION: &str = "schemaVersion";

    /// The transaction list, newest first, as a JSON array.
    pub const TRANSACTIONS: &str = "transactions";

    /// The budget category list as a JSON array. Spend totals are derived
    /// and never part of the snapshot.
    pub const BUDGET_CATEGORIES: &str = "budgetCategories";

    /// The savings goal list as a JSON array.
    pub const GOALS: &str = "goals";
}

/// A storage medium that holds text values under string keys.
///
/// Implementations only need whole-value get and set; the ledger always
/// overwrites complete snapshots and treats an absent key as an empty
/// record list.
pub trait KeyValueStore {
    /// Read the value stored under `key`, or `None` if the key has never
    /// been written.
    fn get(&self, key: &str) -> Result<Option<String>, Error>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), Error>;
}

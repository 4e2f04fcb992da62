//! The record store and mutation API.
//!
//! A [Ledger] owns the three record lists and the storage medium they are
//! persisted to. Every mutation follows the same shape: validate the input,
//! apply the change in memory, then write the full snapshot through to
//! storage. If the write fails the in-memory change is rolled back, so a
//! mutation either fully succeeds or leaves prior state untouched.

use serde::de::DeserializeOwned;
use time::{Date, OffsetDateTime};

use crate::{
    Error,
    models::{BudgetCategory, Goal, Transaction, TransactionKind},
    record_id::{IdGenerator, RecordId},
    storage::{KeyValueStore, SCHEMA_VERSION, keys},
};

/// The record store: transactions, budget categories, and savings goals,
/// backed by a key-value storage medium.
///
/// Construct one with [Ledger::load]. The lists are read through the
/// accessor methods and changed only through the mutation methods; derived
/// values (budget spend, goal progress, summaries, reports) live in
/// [crate::aggregation] and are recomputed from the lists on demand.
#[derive(Debug)]
pub struct Ledger<S> {
    storage: S,
    id_generator: IdGenerator,
    transactions: Vec<Transaction>,
    budget_categories: Vec<BudgetCategory>,
    goals: Vec<Goal>,
}

impl<S: KeyValueStore> Ledger<S> {
    /// Load the record lists from `storage`.
    ///
    /// A key that has never been written yields an empty list. The first
    /// load of a fresh store stamps it with the current schema version.
    ///
    /// # Errors
    /// - [Error::UnsupportedSchemaVersion] if the snapshot was written by a
    ///   newer schema than this library understands.
    /// - [Error::Serialization] if a stored snapshot is not valid JSON for
    ///   its record type.
    /// - [Error::Sql] if the storage medium fails.
    pub fn load(mut storage: S) -> Result<Self, Error> {
        match storage.get(keys::SCHEMA_VERSION)? {
            Some(text) => {
                let version = text.trim().parse::<u32>().map_err(|_| {
                    Error::Serialization(format!("invalid schema version {text:?}"))
                })?;

                if version != SCHEMA_VERSION {
                    return Err(Error::UnsupportedSchemaVersion(version));
                }
            }
            None => storage.set(keys::SCHEMA_VERSION, &SCHEMA_VERSION.to_string())?,
        }

        let transactions: Vec<Transaction> = load_list(&storage, keys::TRANSACTIONS)?;
        let budget_categories: Vec<BudgetCategory> = load_list(&storage, keys::BUDGET_CATEGORIES)?;
        let goals: Vec<Goal> = load_list(&storage, keys::GOALS)?;

        let mut id_generator = IdGenerator::new();
        for id in transactions
            .iter()
            .map(|transaction| transaction.id)
            .chain(budget_categories.iter().map(|category| category.id))
            .chain(goals.iter().map(|goal| goal.id))
        {
            id_generator.observe(id);
        }

        tracing::debug!(
            "loaded ledger with {} transactions, {} budget categories, {} goals",
            transactions.len(),
            budget_categories.len(),
            goals.len()
        );

        Ok(Self {
            storage,
            id_generator,
            transactions,
            budget_categories,
            goals,
        })
    }

    /// The transactions, newest first.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// The budget categories, in creation order.
    pub fn budget_categories(&self) -> &[BudgetCategory] {
        &self.budget_categories
    }

    /// The savings goals, in creation order.
    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    /// Record an income or expense and persist the change.
    ///
    /// The new transaction is prepended so the list stays ordered newest
    /// first.
    ///
    /// # Errors
    /// - [Error::InvalidAmount] if `amount` is not a finite number greater
    ///   than zero; nothing is stored in that case.
    /// - [Error::Sql] or [Error::Serialization] if persisting fails; the
    ///   list is left unchanged.
    pub fn add_transaction(
        &mut self,
        kind: TransactionKind,
        amount: f64,
        description: &str,
        category: &str,
        date: Date,
    ) -> Result<&Transaction, Error> {
        let amount = validate_amount(amount)?;

        let transaction = Transaction {
            id: self.id_generator.next_id(),
            kind,
            amount,
            description: description.to_owned(),
            category: category.to_owned(),
            date,
            created_at: OffsetDateTime::now_utc(),
        };

        tracing::debug!(
            "adding {kind:?} transaction {} of {amount} in category {category:?}",
            transaction.id
        );
        self.transactions.insert(0, transaction);

        if let Err(error) = self.persist() {
            self.transactions.remove(0);
            return Err(error);
        }

        Ok(&self.transactions[0])
    }

    /// Add a budget category with the given monthly spending limit and
    /// persist the change.
    ///
    /// # Errors
    /// - [Error::EmptyName] if `name` is empty.
    /// - [Error::InvalidAmount] if `limit` is not a finite number greater
    ///   than zero.
    /// - [Error::Sql] or [Error::Serialization] if persisting fails; the
    ///   list is left unchanged.
    pub fn add_budget_category(
        &mut self,
        name: &str,
        limit: f64,
    ) -> Result<&BudgetCategory, Error> {
        let name = validate_name(name)?;
        let limit = validate_amount(limit)?;

        let category = BudgetCategory {
            id: self.id_generator.next_id(),
            name: name.to_owned(),
            limit,
        };

        tracing::debug!("adding budget category {name:?} with limit {limit}");
        self.budget_categories.push(category);

        if let Err(error) = self.persist() {
            self.budget_categories.pop();
            return Err(error);
        }

        Ok(self
            .budget_categories
            .last()
            .expect("budget category was just pushed"))
    }

    /// Add a savings goal starting from zero saved and persist the change.
    ///
    /// # Errors
    /// - [Error::EmptyName] if `name` is empty.
    /// - [Error::InvalidAmount] if `target` is not a finite number greater
    ///   than zero.
    /// - [Error::Sql] or [Error::Serialization] if persisting fails; the
    ///   list is left unchanged.
    pub fn add_goal(&mut self, name: &str, target: f64, deadline: Date) -> Result<&Goal, Error> {
        let name = validate_name(name)?;
        let target = validate_amount(target)?;

        let goal = Goal {
            id: self.id_generator.next_id(),
            name: name.to_owned(),
            target,
            current: 0.0,
            deadline,
        };

        tracing::debug!("adding goal {name:?} with target {target} due {deadline}");
        self.goals.push(goal);

        if let Err(error) = self.persist() {
            self.goals.pop();
            return Err(error);
        }

        Ok(self.goals.last().expect("goal was just pushed"))
    }

    /// Delete the transaction with the given ID and persist the change.
    ///
    /// Returns `false`, without writing anything, if no transaction has
    /// that ID; a missing record is part of the contract, not an error.
    ///
    /// # Errors
    /// [Error::Sql] or [Error::Serialization] if persisting fails; the list
    /// is left unchanged.
    pub fn delete_transaction(&mut self, id: RecordId) -> Result<bool, Error> {
        let Some(index) = self
            .transactions
            .iter()
            .position(|transaction| transaction.id == id)
        else {
            return Ok(false);
        };

        tracing::debug!("deleting transaction {id}");
        let removed = self.transactions.remove(index);

        if let Err(error) = self.persist() {
            self.transactions.insert(index, removed);
            return Err(error);
        }

        Ok(true)
    }

    /// Delete the budget category with the given ID and persist the change.
    ///
    /// Returns `false`, without writing anything, if no category has that
    /// ID. Expense transactions that referenced the category keep their
    /// category text; they simply stop counting against any budget.
    ///
    /// # Errors
    /// [Error::Sql] or [Error::Serialization] if persisting fails; the list
    /// is left unchanged.
    pub fn delete_budget_category(&mut self, id: RecordId) -> Result<bool, Error> {
        let Some(index) = self
            .budget_categories
            .iter()
            .position(|category| category.id == id)
        else {
            return Ok(false);
        };

        tracing::debug!("deleting budget category {id}");
        let removed = self.budget_categories.remove(index);

        if let Err(error) = self.persist() {
            self.budget_categories.insert(index, removed);
            return Err(error);
        }

        Ok(true)
    }

    /// Delete the goal with the given ID and persist the change.
    ///
    /// Returns `false`, without writing anything, if no goal has that ID.
    /// Money recorded against the goal disappears with it.
    ///
    /// # Errors
    /// [Error::Sql] or [Error::Serialization] if persisting fails; the list
    /// is left unchanged.
    pub fn delete_goal(&mut self, id: RecordId) -> Result<bool, Error> {
        let Some(index) = self.goals.iter().position(|goal| goal.id == id) else {
            return Ok(false);
        };

        tracing::debug!("deleting goal {id}");
        let removed = self.goals.remove(index);

        if let Err(error) = self.persist() {
            self.goals.insert(index, removed);
            return Err(error);
        }

        Ok(true)
    }

    /// Add money to a goal's saved total and persist the change.
    ///
    /// Returns the updated goal, or `None`, without writing anything, if no
    /// goal has that ID.
    ///
    /// # Errors
    /// - [Error::InvalidAmount] if `amount` is not a finite number.
    /// - [Error::NegativeDeposit] if `amount` is negative: goals only
    ///   accumulate, there is no withdrawal operation.
    /// - [Error::Sql] or [Error::Serialization] if persisting fails; the
    ///   goal is left unchanged.
    pub fn deposit_to_goal(
        &mut self,
        id: RecordId,
        amount: f64,
    ) -> Result<Option<&Goal>, Error> {
        if !amount.is_finite() {
            return Err(Error::InvalidAmount(amount));
        }
        if amount < 0.0 {
            return Err(Error::NegativeDeposit(amount));
        }

        let Some(index) = self.goals.iter().position(|goal| goal.id == id) else {
            return Ok(None);
        };

        tracing::debug!("depositing {amount} to goal {id}");
        let previous = self.goals[index].current;
        self.goals[index].current += amount;

        if let Err(error) = self.persist() {
            self.goals[index].current = previous;
            return Err(error);
        }

        Ok(Some(&self.goals[index]))
    }

    /// Write the full snapshot of all three lists to storage.
    ///
    /// Every list is serialized and written under its fixed key
    /// unconditionally, with no diffing. The mutation methods call this
    /// after every change; embedders only need it if they want to force a
    /// write.
    ///
    /// # Errors
    /// [Error::Serialization] if a list cannot be serialized, [Error::Sql]
    /// if the storage medium fails.
    pub fn persist(&mut self) -> Result<(), Error> {
        let transactions = serde_json::to_string(&self.transactions)?;
        let budget_categories = serde_json::to_string(&self.budget_categories)?;
        let goals = serde_json::to_string(&self.goals)?;

        self.storage.set(keys::TRANSACTIONS, &transactions)?;
        self.storage.set(keys::BUDGET_CATEGORIES, &budget_categories)?;
        self.storage.set(keys::GOALS, &goals)?;

        Ok(())
    }
}

fn load_list<S: KeyValueStore, T: DeserializeOwned>(
    storage: &S,
    key: &str,
) -> Result<Vec<T>, Error> {
    match storage.get(key)? {
        Some(json) => Ok(serde_json::from_str(&json)?),
        None => Ok(Vec::new()),
    }
}

fn validate_amount(amount: f64) -> Result<f64, Error> {
    if amount.is_finite() && amount > 0.0 {
        Ok(amount)
    } else {
        Err(Error::InvalidAmount(amount))
    }
}

fn validate_name(name: &str) -> Result<&str, Error> {
    if name.is_empty() {
        Err(Error::EmptyName)
    } else {
        Ok(name)
    }
}

#[cfg(test)]
mod ledger_tests {
    use time::macros::date;

    use crate::{
        Error, KeyValueStore, MemoryStore, SCHEMA_VERSION, SqliteStore, TransactionKind, keys,
    };

    use super::Ledger;

    fn get_test_ledger() -> Ledger<MemoryStore> {
        Ledger::load(MemoryStore::new()).expect("could not load ledger from empty store")
    }

    #[test]
    fn load_from_empty_store_yields_empty_lists() {
        let ledger = get_test_ledger();

        assert!(ledger.transactions().is_empty());
        assert!(ledger.budget_categories().is_empty());
        assert!(ledger.goals().is_empty());
    }

    #[test]
    fn load_stamps_fresh_store_with_schema_version() {
        let data_dir = tempfile::tempdir().unwrap();
        let db_path = data_dir.path().join("pocketbook.db");

        {
            Ledger::load(SqliteStore::open(&db_path).unwrap()).unwrap();
        }

        let store = SqliteStore::open(&db_path).unwrap();

        assert_eq!(
            store.get(keys::SCHEMA_VERSION),
            Ok(Some(SCHEMA_VERSION.to_string()))
        );
    }

    #[test]
    fn load_accepts_store_stamped_with_current_version() {
        let mut store = MemoryStore::new();
        store
            .set(keys::SCHEMA_VERSION, &SCHEMA_VERSION.to_string())
            .unwrap();

        assert!(Ledger::load(store).is_ok());
    }

    #[test]
    fn load_rejects_snapshot_from_newer_schema() {
        let mut store = MemoryStore::new();
        store.set(keys::SCHEMA_VERSION, "2").unwrap();

        let result = Ledger::load(store).map(|_| ());

        assert_eq!(result, Err(Error::UnsupportedSchemaVersion(2)));
    }

    #[test]
    fn load_rejects_corrupt_snapshot() {
        let mut store = MemoryStore::new();
        store.set(keys::TRANSACTIONS, "not json").unwrap();

        let result = Ledger::load(store).map(|_| ());

        assert!(matches!(result, Err(Error::Serialization(_))));
    }

    #[test]
    fn add_transaction_prepends_newest_first() {
        let mut ledger = get_test_ledger();

        let first_id = ledger
            .add_transaction(
                TransactionKind::Income,
                5000.0,
                "Salary",
                "Salary",
                date!(2024 - 03 - 01),
            )
            .unwrap()
            .id;
        let second_id = ledger
            .add_transaction(
                TransactionKind::Expense,
                1200.0,
                "Groceries",
                "Food",
                date!(2024 - 03 - 15),
            )
            .unwrap()
            .id;

        let ids: Vec<_> = ledger
            .transactions()
            .iter()
            .map(|transaction| transaction.id)
            .collect();
        assert_eq!(ids, vec![second_id, first_id]);
    }

    #[test]
    fn add_transaction_rejects_bad_amounts() {
        let mut ledger = get_test_ledger();

        for amount in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, 0.0, -5.0] {
            let result = ledger
                .add_transaction(
                    TransactionKind::Expense,
                    amount,
                    "Broken",
                    "Other",
                    date!(2024 - 03 - 15),
                )
                .map(|_| ());

            assert!(matches!(result, Err(Error::InvalidAmount(_))));
        }

        assert!(ledger.transactions().is_empty());
    }

    #[test]
    fn add_then_delete_restores_prior_list_and_order() {
        let mut ledger = get_test_ledger();
        ledger
            .add_transaction(
                TransactionKind::Income,
                5000.0,
                "Salary",
                "Salary",
                date!(2024 - 03 - 01),
            )
            .unwrap();
        ledger
            .add_transaction(
                TransactionKind::Expense,
                40.0,
                "Petrol",
                "Transportation",
                date!(2024 - 03 - 02),
            )
            .unwrap();
        let before: Vec<_> = ledger.transactions().to_vec();

        let id = ledger
            .add_transaction(
                TransactionKind::Expense,
                9.5,
                "Coffee",
                "Food",
                date!(2024 - 03 - 03),
            )
            .unwrap()
            .id;
        let removed = ledger.delete_transaction(id).unwrap();

        assert!(removed);
        assert_eq!(ledger.transactions(), before.as_slice());
    }

    #[test]
    fn delete_of_unknown_id_is_a_silent_no_op() {
        let mut ledger = get_test_ledger();

        assert_eq!(ledger.delete_transaction(12345), Ok(false));
        assert_eq!(ledger.delete_budget_category(12345), Ok(false));
        assert_eq!(ledger.delete_goal(12345), Ok(false));
    }

    #[test]
    fn add_budget_category_appends_in_creation_order() {
        let mut ledger = get_test_ledger();

        ledger.add_budget_category("Food", 1000.0).unwrap();
        ledger.add_budget_category("Bills", 650.0).unwrap();

        let names: Vec<_> = ledger
            .budget_categories()
            .iter()
            .map(|category| category.name.as_str())
            .collect();
        assert_eq!(names, vec!["Food", "Bills"]);
    }

    #[test]
    fn add_budget_category_rejects_empty_name_and_bad_limit() {
        let mut ledger = get_test_ledger();

        assert_eq!(
            ledger.add_budget_category("", 100.0).map(|_| ()),
            Err(Error::EmptyName)
        );
        assert_eq!(
            ledger.add_budget_category("Food", 0.0).map(|_| ()),
            Err(Error::InvalidAmount(0.0))
        );
        assert!(ledger.budget_categories().is_empty());
    }

    #[test]
    fn new_goal_starts_with_nothing_saved() {
        let mut ledger = get_test_ledger();

        let goal = ledger
            .add_goal("Emergency fund", 10_000.0, date!(2025 - 06 - 30))
            .unwrap();

        assert_eq!(goal.current, 0.0);
        assert_eq!(goal.target, 10_000.0);
    }

    #[test]
    fn deposits_accumulate_on_the_goal() {
        let mut ledger = get_test_ledger();
        let id = ledger
            .add_goal("Emergency fund", 10_000.0, date!(2025 - 06 - 30))
            .unwrap()
            .id;

        ledger.deposit_to_goal(id, 2500.0).unwrap();
        let goal = ledger.deposit_to_goal(id, 1500.0).unwrap().unwrap();

        assert_eq!(goal.current, 4000.0);
    }

    #[test]
    fn deposit_rejects_negative_and_non_finite_amounts() {
        let mut ledger = get_test_ledger();
        let id = ledger
            .add_goal("Emergency fund", 10_000.0, date!(2025 - 06 - 30))
            .unwrap()
            .id;

        assert_eq!(
            ledger.deposit_to_goal(id, -100.0).map(|_| ()),
            Err(Error::NegativeDeposit(-100.0))
        );
        assert!(matches!(
            ledger.deposit_to_goal(id, f64::NAN).map(|_| ()),
            Err(Error::InvalidAmount(_))
        ));
        assert_eq!(ledger.goals()[0].current, 0.0);
    }

    #[test]
    fn deposit_to_unknown_goal_is_a_no_op() {
        let mut ledger = get_test_ledger();

        assert_eq!(ledger.deposit_to_goal(999, 100.0), Ok(None));
    }

    #[test]
    fn new_ids_never_collide_with_loaded_records() {
        let mut store = MemoryStore::new();
        store
            .set(
                keys::GOALS,
                "[{\"id\":9000000000000000,\"name\":\"Boat\",\"target\":1.0,\
                 \"current\":0.0,\"deadline\":\"2030-01-01\"}]",
            )
            .unwrap();
        let mut ledger = Ledger::load(store).unwrap();

        let goal = ledger.add_goal("Car", 500.0, date!(2030 - 01 - 01)).unwrap();

        assert!(goal.id > 9_000_000_000_000_000);
    }

    #[test]
    fn persisted_state_survives_reopening_the_store() {
        let data_dir = tempfile::tempdir().unwrap();
        let db_path = data_dir.path().join("pocketbook.db");

        {
            let store = SqliteStore::open(&db_path).unwrap();
            let mut ledger = Ledger::load(store).unwrap();
            ledger
                .add_transaction(
                    TransactionKind::Income,
                    5000.0,
                    "Salary",
                    "Salary",
                    date!(2024 - 03 - 01),
                )
                .unwrap();
            ledger.add_budget_category("Food", 1000.0).unwrap();
            let goal_id = ledger
                .add_goal("Emergency fund", 10_000.0, date!(2025 - 06 - 30))
                .unwrap()
                .id;
            ledger.deposit_to_goal(goal_id, 2500.0).unwrap();

            let reopened = Ledger::load(SqliteStore::open(&db_path).unwrap()).unwrap();

            assert_eq!(reopened.transactions(), ledger.transactions());
            assert_eq!(reopened.budget_categories(), ledger.budget_categories());
            assert_eq!(reopened.goals(), ledger.goals());
        }
    }

    #[test]
    fn empty_ledger_round_trips_through_storage() {
        let data_dir = tempfile::tempdir().unwrap();
        let db_path = data_dir.path().join("pocketbook.db");

        {
            let mut ledger = Ledger::load(SqliteStore::open(&db_path).unwrap()).unwrap();
            ledger.persist().unwrap();
        }

        let reopened = Ledger::load(SqliteStore::open(&db_path).unwrap()).unwrap();

        assert!(reopened.transactions().is_empty());
        assert!(reopened.budget_categories().is_empty());
        assert!(reopened.goals().is_empty());
    }
}

//! Record identifier generation.

use time::OffsetDateTime;

/// Alias for the integer type used for record IDs.
pub type RecordId = i64;

/// Hands out unique, strictly increasing record IDs.
///
/// The original design derived IDs from the creation timestamp, which can
/// collide when two records are created within the same millisecond. The
/// generator keeps the timestamp only as a seed and increments from there,
/// so IDs stay unique no matter how quickly records are created.
///
/// A ledger owns one generator for all three record lists and advances it
/// past every persisted ID with [IdGenerator::observe] when a snapshot is
/// loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdGenerator {
    next: RecordId,
}

impl IdGenerator {
    /// Create a generator seeded from the current wall-clock time in
    /// milliseconds since the Unix epoch.
    pub fn new() -> Self {
        let now = OffsetDateTime::now_utc();
        let millis = (now.unix_timestamp_nanos() / 1_000_000) as RecordId;

        Self::seeded_with(millis)
    }

    /// Create a generator whose first ID will be `seed`.
    pub fn seeded_with(seed: RecordId) -> Self {
        Self { next: seed }
    }

    /// Take the next unique ID.
    pub fn next_id(&mut self) -> RecordId {
        let id = self.next;
        self.next += 1;
        id
    }

    /// Advance the generator past `id` so it can never be handed out again.
    pub fn observe(&mut self, id: RecordId) {
        if id >= self.next {
            self.next = id + 1;
        }
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod id_generator_tests {
    use super::IdGenerator;

    #[test]
    fn ids_are_strictly_increasing() {
        let mut generator = IdGenerator::new();

        let first = generator.next_id();
        let second = generator.next_id();
        let third = generator.next_id();

        assert!(first < second);
        assert!(second < third);
    }

    #[test]
    fn seeded_generator_starts_at_seed() {
        let mut generator = IdGenerator::seeded_with(42);

        assert_eq!(generator.next_id(), 42);
        assert_eq!(generator.next_id(), 43);
    }

    #[test]
    fn observe_skips_past_seen_ids() {
        let mut generator = IdGenerator::seeded_with(1);
        generator.observe(100);

        assert_eq!(generator.next_id(), 101);
    }

    #[test]
    fn observe_ignores_ids_already_behind() {
        let mut generator = IdGenerator::seeded_with(50);
        generator.observe(10);

        assert_eq!(generator.next_id(), 50);
    }
}

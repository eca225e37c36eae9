use parking_lot::{Mutex, MutexGuard};

use crate::domain::{ids_match, Entity};

// ── Repository ────────────────────────────────────────────────────────────────

/// Ordered in-memory collection of one resource type.
///
/// All access goes through [`Repository::lock`], so a request that reads,
/// validates and then mutates does so while holding the lock the whole time.
pub struct Repository<T> {
    records: Mutex<Vec<T>>,
}

impl<T: Entity> Repository<T> {
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    pub fn with_records(records: Vec<T>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }

    pub fn lock(&self) -> Collection<'_, T> {
        Collection {
            records: self.records.lock(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn snapshot(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.records.lock().clone()
    }
}

impl<T: Entity> Default for Repository<T> {
    fn default() -> Self {
        Self::new()
    }
}

// ── Locked view ───────────────────────────────────────────────────────────────

/// Exclusive access to a repository's records for the span of one request.
pub struct Collection<'r, T> {
    records: MutexGuard<'r, Vec<T>>,
}

impl<T: Entity> Collection<'_, T> {
    pub fn list(&self) -> &[T] {
        &self.records
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|record| ids_match(record.id(), id))
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.records.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.records.get_mut(index)
    }

    /// Appends without checking for duplicate ids; uniqueness is the id
    /// generator's job.
    pub fn append(&mut self, record: T) {
        self.records.push(record);
    }

    pub fn remove_at(&mut self, index: usize) -> Option<T> {
        (index < self.records.len()).then(|| self.records.remove(index))
    }
}

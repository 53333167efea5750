// 🗄️ Repository - ordered in-memory store with integer id assignment
//
// Insertion order is the iteration order. Ids start at 1, only grow, and are
// never handed out twice, even after deletions. The counter and the
// collection are only ever changed together inside one `&mut self` call.

use crate::entities::Record;
use crate::error::{Error, Result};
use chrono::Utc;

#[derive(Debug, Clone)]
pub struct Repository<R: Record> {
    records: Vec<R>,
    next_id: u64,
}

impl<R: Record> Repository<R> {
    pub fn new() -> Self {
        Repository {
            records: Vec::new(),
            next_id: 1,
        }
    }

    /// Store a draft under the next id
    pub fn create(&mut self, draft: R::Draft) -> Result<R> {
        self.try_create(draft, |_| Ok(()))
    }

    /// Build the candidate record, run `check` on it, and only then commit.
    /// A rejected candidate consumes no id.
    pub fn try_create<F>(&mut self, draft: R::Draft, check: F) -> Result<R>
    where
        F: FnOnce(&R) -> Result<()>,
    {
        let candidate = R::build(self.next_id, Utc::now(), draft)?;
        check(&candidate)?;

        self.next_id += 1;
        self.records.push(candidate.clone());
        Ok(candidate)
    }

    pub fn get(&self, id: u64) -> Result<&R> {
        self.records
            .iter()
            .find(|r| r.id() == id)
            .ok_or(Error::NotFound(id))
    }

    /// All records in insertion order
    pub fn list(&self) -> &[R] {
        &self.records
    }

    /// Merge `patch` over the stored record; id and created_at are kept
    pub fn replace(&mut self, id: u64, patch: R::Patch) -> Result<R> {
        self.try_replace(id, patch, |_| Ok(()))
    }

    /// Like `replace`, but the merged record must pass `check` before it is stored
    pub fn try_replace<F>(&mut self, id: u64, patch: R::Patch, check: F) -> Result<R>
    where
        F: FnOnce(&R) -> Result<()>,
    {
        let slot = self
            .records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or(Error::NotFound(id))?;

        let merged = slot.merge(patch)?;
        check(&merged)?;

        *slot = merged.clone();
        Ok(merged)
    }

    /// Remove the record with `id`, keeping the order of the rest
    pub fn delete(&mut self, id: u64) -> Result<R> {
        let index = self
            .records
            .iter()
            .position(|r| r.id() == id)
            .ok_or(Error::NotFound(id))?;

        Ok(self.records.remove(index))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Id the next successful create will receive
    pub fn next_id(&self) -> u64 {
        self.next_id
    }
}

impl<R: Record> Default for Repository<R> {
    fn default() -> Self {
        Self::new()
    }
}

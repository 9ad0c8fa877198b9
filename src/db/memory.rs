use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

use super::store::{EntryStore, PairStore};
use crate::models::{Entry, NewEntry};
use crate::{AppError, AppResult};

#[derive(Default)]
struct Tables {
    /// In creation order.
    pairs: Vec<Uuid>,
    members: Vec<(Uuid, Uuid)>,
    entries: Vec<Entry>,
}

/// In-process row store for tests. Any operation can be made to fail by
/// naming it in `fail_on`, or to fail after a number of successful calls
/// with `fail_after`.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    fail_on: Mutex<Vec<&'static str>>,
    budgets: Mutex<HashMap<&'static str, usize>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_on(&self, operation: &'static str) {
        self.fail_on.lock().unwrap().push(operation);
    }

    /// Lets `operation` succeed `successes` more times, then fails it.
    pub fn fail_after(&self, operation: &'static str, successes: usize) {
        self.budgets.lock().unwrap().insert(operation, successes);
    }

    pub fn clear_failures(&self) {
        self.fail_on.lock().unwrap().clear();
        self.budgets.lock().unwrap().clear();
    }

    fn check(&self, operation: &'static str) -> AppResult<()> {
        let failed = Err(AppError::Internal(format!("{} failed", operation)));
        if self.fail_on.lock().unwrap().contains(&operation) {
            return failed;
        }
        if let Some(remaining) = self.budgets.lock().unwrap().get_mut(operation) {
            if *remaining == 0 {
                return failed;
            }
            *remaining -= 1;
        }
        Ok(())
    }

    pub fn pair_count(&self) -> usize {
        self.tables.lock().unwrap().pairs.len()
    }

    pub fn member_count(&self) -> usize {
        self.tables.lock().unwrap().members.len()
    }

    pub fn entry_count(&self) -> usize {
        self.tables.lock().unwrap().entries.len()
    }

    /// Inserts a pair with both members directly, bypassing provisioning.
    pub fn seed_pair(&self, members: &[Uuid]) -> Uuid {
        let mut tables = self.tables.lock().unwrap();
        let pair_id = Uuid::new_v4();
        tables.pairs.push(pair_id);
        for user_id in members {
            tables.members.push((pair_id, *user_id));
        }
        pair_id
    }
}

#[async_trait]
impl EntryStore for MemoryStore {
    async fn list_entries(&self, pair_id: Uuid) -> AppResult<Vec<Entry>> {
        self.check("list_entries")?;
        let tables = self.tables.lock().unwrap();
        let mut entries: Vec<Entry> = tables
            .entries
            .iter()
            .filter(|e| e.pair_id == pair_id)
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
        Ok(entries)
    }

    async fn insert_entry(&self, entry: NewEntry) -> AppResult<Entry> {
        self.check("insert_entry")?;
        let stored = Entry {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            pair_id: entry.pair_id,
            user_id: entry.user_id,
            date: entry.date,
            author: entry.author,
            mood: entry.mood,
            text: entry.text,
        };
        self.tables.lock().unwrap().entries.push(stored.clone());
        Ok(stored)
    }

    async fn delete_entry(&self, pair_id: Uuid, entry_id: Uuid) -> AppResult<bool> {
        self.check("delete_entry")?;
        let mut tables = self.tables.lock().unwrap();
        let before = tables.entries.len();
        tables
            .entries
            .retain(|e| !(e.id == entry_id && e.pair_id == pair_id));
        Ok(tables.entries.len() < before)
    }
}

#[async_trait]
impl PairStore for MemoryStore {
    async fn pair_ids_for(&self, user_id: Uuid) -> AppResult<Vec<Uuid>> {
        self.check("pair_ids_for")?;
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .pairs
            .iter()
            .filter(|p| tables.members.contains(&(**p, user_id)))
            .copied()
            .collect())
    }

    async fn members_of(&self, pair_id: Uuid) -> AppResult<Vec<Uuid>> {
        self.check("members_of")?;
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .members
            .iter()
            .filter(|(p, _)| *p == pair_id)
            .map(|(_, user_id)| *user_id)
            .collect())
    }

    async fn create_pair(&self) -> AppResult<Uuid> {
        self.check("create_pair")?;
        let id = Uuid::new_v4();
        self.tables.lock().unwrap().pairs.push(id);
        Ok(id)
    }

    async fn add_member(&self, pair_id: Uuid, user_id: Uuid) -> AppResult<()> {
        self.check("add_member")?;
        let mut tables = self.tables.lock().unwrap();
        if !tables.members.contains(&(pair_id, user_id)) {
            tables.members.push((pair_id, user_id));
        }
        Ok(())
    }
}

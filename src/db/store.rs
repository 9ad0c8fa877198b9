use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{Entry, NewEntry};
use crate::AppResult;

/// Journal rows for one pair.
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// All entries of `pair_id`, newest date first.
    async fn list_entries(&self, pair_id: Uuid) -> AppResult<Vec<Entry>>;

    async fn insert_entry(&self, entry: NewEntry) -> AppResult<Entry>;

    /// Removes one entry of `pair_id`. Returns false when no such entry exists.
    async fn delete_entry(&self, pair_id: Uuid, entry_id: Uuid) -> AppResult<bool>;
}

/// Pairs and their memberships.
#[async_trait]
pub trait PairStore: Send + Sync {
    /// Pair ids `user_id` belongs to, oldest pair first.
    async fn pair_ids_for(&self, user_id: Uuid) -> AppResult<Vec<Uuid>>;

    /// Accounts linked to `pair_id`.
    async fn members_of(&self, pair_id: Uuid) -> AppResult<Vec<Uuid>>;

    async fn create_pair(&self) -> AppResult<Uuid>;

    /// Links `user_id` to `pair_id`; a no-op when the link already exists.
    async fn add_member(&self, pair_id: Uuid, user_id: Uuid) -> AppResult<()>;
}

/// Everything the journal needs from the row store.
pub trait JournalStore: EntryStore + PairStore {}

impl<T: EntryStore + PairStore> JournalStore for T {}

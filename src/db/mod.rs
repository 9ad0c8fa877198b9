pub mod pg_store;
pub mod pool;
pub mod store;

#[cfg(test)]
pub mod memory;

pub use pg_store::PgStore;
pub use pool::{create_pool, run_migrations};
pub use store::{EntryStore, JournalStore, PairStore};

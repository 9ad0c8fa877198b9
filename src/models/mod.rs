pub mod entry;
pub mod entry_input;
pub mod mood;
pub mod pair;

pub use entry::{Entry, EntryRow, NewEntry, MAX_ENTRY_CHARS};
pub use entry_input::{ArchiveQuery, CreateEntryInput, DateQuery, EntryMutationResponse, PromptQuery, StatsQuery};
pub use mood::{Author, Mood, MoodBucket, MoodInfo};
pub use pair::{IdentityUser, PairResponse, ProvisionRequest, ProvisionResponse};

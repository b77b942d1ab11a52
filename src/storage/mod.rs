//! Durable storage for users, modules, and ratings.
//!
//! The recommender only talks to the [`UserStore`], [`ModuleStore`] and
//! [`RatingStore`] traits. Two backends ship with the crate:
//!
//! - [`CsvStore`]: `users.csv`, `modules.csv`, `ratings.csv` under a data directory.
//! - [`MemoryStore`]: process-local vectors, for tests and library callers.

pub mod error;
pub mod file;
pub mod memory;
pub mod store;


pub use error::{StorageError, StorageResult};
pub use file::{CsvStore, MODULES_FILE, RATINGS_FILE, USERS_FILE};
pub use memory::MemoryStore;
pub use store::{ModuleStore, RatingStore, UserStore};

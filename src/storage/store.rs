use crate::catalog::{Module, Rating, User, UserId};

use super::error::StorageResult;

/// Durable user records.
pub trait UserStore: Send + Sync {
    /// Loads every stored user, in storage order.
    fn load_all(&self) -> StorageResult<Vec<User>>;

    /// Appends `user`. Does not check for duplicate ids.
    fn append(&self, user: &User) -> StorageResult<()>;

    /// Next free id: highest stored id plus one, or `1` for an empty store.
    fn next_id(&self) -> StorageResult<UserId> {
        Ok(self
            .load_all()?
            .iter()
            .map(|u| u.user_id)
            .max()
            .map_or(1, |max| max + 1))
    }
}

/// Read-only module catalog.
pub trait ModuleStore: Send + Sync {
    /// Loads the catalog, in catalog order.
    fn load_all(&self) -> StorageResult<Vec<Module>>;
}

/// Append-only rating log.
pub trait RatingStore: Send + Sync {
    /// Loads the full log, oldest first.
    fn load_all(&self) -> StorageResult<Vec<Rating>>;

    /// Appends one rating. Repeated `(user, module)` pairs are kept.
    fn append(&self, rating: &Rating) -> StorageResult<()>;
}

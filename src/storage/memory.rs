use parking_lot::RwLock;

use crate::catalog::{Module, Rating, User};

use super::error::StorageResult;
use super::store::{ModuleStore, RatingStore, UserStore};

#[derive(Debug, Default)]
/// Process-local store backed by vectors.
pub struct MemoryStore {
    users: RwLock<Vec<User>>,
    modules: RwLock<Vec<Module>>,
    ratings: RwLock<Vec<Rating>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(self, users: Vec<User>) -> Self {
        *self.users.write() = users;
        self
    }

    pub fn with_modules(self, modules: Vec<Module>) -> Self {
        *self.modules.write() = modules;
        self
    }

    pub fn with_ratings(self, ratings: Vec<Rating>) -> Self {
        *self.ratings.write() = ratings;
        self
    }

    pub fn user_count(&self) -> usize {
        self.users.read().len()
    }

    pub fn rating_count(&self) -> usize {
        self.ratings.read().len()
    }
}

impl UserStore for MemoryStore {
    fn load_all(&self) -> StorageResult<Vec<User>> {
        Ok(self.users.read().clone())
    }

    fn append(&self, user: &User) -> StorageResult<()> {
        self.users.write().push(user.clone());
        Ok(())
    }

    fn next_id(&self) -> StorageResult<u32> {
        Ok(self
            .users
            .read()
            .iter()
            .map(|u| u.user_id)
            .max()
            .map_or(1, |max| max + 1))
    }
}

impl ModuleStore for MemoryStore {
    fn load_all(&self) -> StorageResult<Vec<Module>> {
        Ok(self.modules.read().clone())
    }
}

impl RatingStore for MemoryStore {
    fn load_all(&self) -> StorageResult<Vec<Rating>> {
        Ok(self.ratings.read().clone())
    }

    fn append(&self, rating: &Rating) -> StorageResult<()> {
        self.ratings.write().push(*rating);
        Ok(())
    }
}

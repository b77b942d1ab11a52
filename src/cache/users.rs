//! Shared user directory.
//!
//! The directory is loaded in full at startup and never lazily fills from
//! storage: a miss means the user does not exist.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::catalog::{User, UserId};

#[derive(Clone, Default)]
/// Cloneable handle to the user map. Clones share state.
pub struct UserDirectory {
    inner: Arc<RwLock<HashMap<UserId, User>>>,
}

impl UserDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a directory from `users`. Later duplicates win.
    pub fn from_users(users: impl IntoIterator<Item = User>) -> Self {
        let map = users.into_iter().map(|u| (u.user_id, u)).collect();
        Self {
            inner: Arc::new(RwLock::new(map)),
        }
    }

    /// Returns a copy of the user, if present.
    #[inline]
    pub fn get(&self, user_id: UserId) -> Option<User> {
        self.inner.read().get(&user_id).cloned()
    }

    /// Runs `f` against the user without cloning it.
    #[inline]
    pub fn with_user<R>(&self, user_id: UserId, f: impl FnOnce(&User) -> R) -> Option<R> {
        self.inner.read().get(&user_id).map(f)
    }

    #[inline]
    pub fn contains(&self, user_id: UserId) -> bool {
        self.inner.read().contains_key(&user_id)
    }

    /// Inserts or overwrites a user and returns the previous record.
    #[inline]
    pub fn insert(&self, user: User) -> Option<User> {
        self.inner.write().insert(user.user_id, user)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Highest cached user id, if any.
    pub fn max_id(&self) -> Option<UserId> {
        self.inner.read().keys().copied().max()
    }

    /// Returns all users ordered by id.
    pub fn snapshot(&self) -> Vec<User> {
        let mut users: Vec<User> = self.inner.read().values().cloned().collect();
        users.sort_by_key(|u| u.user_id);
        users
    }

    /// Returns the number of handles sharing this directory.
    #[inline]
    pub fn strong_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }
}

impl std::fmt::Debug for UserDirectory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserDirectory")
            .field("users", &self.len())
            .field("strong_count", &self.strong_count())
            .finish()
    }
}

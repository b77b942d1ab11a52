//! Domain records: learners, training modules, and ratings.
//!
//! Users and ratings are mutable at runtime (registration, rating submission);
//! the module catalog is loaded once and never changes for the life of a process.

pub mod types;

#[cfg(test)]
mod tests;

pub use types::{Module, ModuleId, NewUser, Rating, RiskProfile, User, UserId};

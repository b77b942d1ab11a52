//! In-memory directories shared across request threads.
//!
//! - [`UserDirectory`]: write-through cache of every registered user.
//! - [`RatingIndex`]: which users have at least one rating, maintained on write
//!   so the hybrid/content-only decision is a lookup instead of a log scan.

pub mod ratings;
pub mod users;


pub use ratings::RatingIndex;
pub use users::UserDirectory;

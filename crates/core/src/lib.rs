//! Domain logic shared by the repository and API layers.
//!
//! Everything in this crate is pure: no I/O, no database handles. The API
//! and repository crates depend on it for the error taxonomy, pagination
//! math, leaderboard scoring, achievement metadata, and search constants.

pub mod achievement;
pub mod error;
pub mod leaderboard;
pub mod pagination;
pub mod search;
pub mod types;
pub mod validation;

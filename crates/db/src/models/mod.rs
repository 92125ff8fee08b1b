//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - `FromRow` + `Serialize` entity structs matching database rows/views
//! - `Deserialize` DTOs for inserts and patches

pub mod achievement;
pub mod leaderboard;
pub mod session;
pub mod strain;
pub mod user;

//! Repository layer: stateless structs exposing async SQL operations.
//!
//! Repositories take a `&PgPool` per call and return raw `sqlx` results;
//! business-rule errors are the caller's concern.

pub mod achievement_repo;
pub mod interaction_repo;
pub mod leaderboard_repo;
pub mod session_repo;
pub mod strain_repo;
pub mod user_repo;

pub use achievement_repo::AchievementRepo;
pub use interaction_repo::InteractionRepo;
pub use leaderboard_repo::LeaderboardRepo;
pub use session_repo::SessionRepo;
pub use strain_repo::StrainRepo;
pub use user_repo::UserRepo;

pub mod account;
pub mod achievements;
pub mod auth;

//! Password hashing and session-token generation.

pub mod password;
pub mod token;

//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing behind the core `PasswordHasher` port.
//! - [`jwt`] -- JWT access-token generation and validation.

pub mod jwt;
pub mod password;

//! Shared utilities.
//!
//! - [`errors`]: application error types and HTTP mapping
//! - [`jwt`]: access token creation and verification
//! - [`password`]: password hashing and verification

pub mod errors;
pub mod jwt;
pub mod password;

//! Configuration modules.
//!
//! Each submodule owns one concern and is loaded from environment
//! variables via a `from_env()` constructor with sensible defaults.
//!
//! - [`cors`]: allowed CORS origins
//! - [`database`]: PostgreSQL connection pool initialization
//! - [`hashing`]: bcrypt work factor
//! - [`jwt`]: signing secret and token lifetime
//! - [`rate_limit`]: request ceilings and window sizes

pub mod cors;
pub mod database;
pub mod hashing;
pub mod jwt;
pub mod rate_limit;

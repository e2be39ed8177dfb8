//! Request-processing middleware.
//!
//! - [`auth`]: bearer token extraction and verification
//! - [`rate_limit`]: fixed-window per-client request limiting
//!
//! # Request flow
//!
//! 1. Rate limit layers reject flooding clients before anything else runs
//! 2. `AuthUser` validates the JWT on protected routes
//! 3. `ValidatedJson` parses and validates the body for routes with one
//! 4. The handler executes; mutating post handlers apply the ownership
//!    policy after looking the resource up

pub mod auth;
pub mod rate_limit;

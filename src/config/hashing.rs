use std::env;

#[derive(Clone, Copy, Debug)]
pub struct HashingConfig {
    /// bcrypt work factor. Lower it in tests, never in production.
    pub bcrypt_cost: u32,
}

impl HashingConfig {
    pub fn from_env() -> Self {
        Self {
            bcrypt_cost: env::var("BCRYPT_COST")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(bcrypt::DEFAULT_COST),
        }
    }
}

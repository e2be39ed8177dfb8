//! PostgreSQL connection pool initialization.
//!
//! The database URL is read from the `DATABASE_URL` environment variable.
//! Call [`init_db_pool`] once during startup; the returned pool is cheaply
//! cloneable and shared through the application state.
//!
//! # Panics
//!
//! Panics if `DATABASE_URL` is unset or the connection cannot be
//! established. There is nothing useful the server can do without a
//! database, so startup aborts.

use sqlx::PgPool;
use std::env;

pub async fn init_db_pool() -> PgPool {
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to database")
}

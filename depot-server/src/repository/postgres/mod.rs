//! Postgres record store
//!
//! Each submodule implements one repository trait against the tables created
//! by [`crate::db::run_migrations`].

mod inventory;
mod order;
mod pipeline;
mod product;
mod run;
mod supplier;

use sqlx::PgPool;

use super::StoreError;

/// Record store backed by a Postgres connection pool
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Maps unique-constraint violations to [`StoreError::Conflict`]
fn conflict_or_database(err: sqlx::Error, what: &str) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return StoreError::Conflict(format!("{} already exists", what));
        }
    }
    StoreError::Database(err)
}

//! MySQL implementation of the scheduling store contract.

pub mod attendance;
pub mod employee;
pub mod leave;
pub mod policy;
pub mod schedule;

use sqlx::MySqlPool;

/// Shared handle the handlers pass into the engine; cloning is cheap (the
/// pool is reference-counted).
#[derive(Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

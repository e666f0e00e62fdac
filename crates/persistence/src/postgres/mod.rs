//! PostgreSQL repositories.
//!
//! Each repository wraps a shared [`PgPool`]. Schema changes live in the
//! workspace `migrations/` directory and are applied with [`run_migrations`].

mod customer;
mod order;
mod product;

pub use customer::PostgresCustomerRepository;
pub use order::PostgresOrderRepository;
pub use product::PostgresProductRepository;

use common::EntityId;
use domain::RepositoryError;
use sqlx::PgPool;

/// Applies every pending migration.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}

/// Maps an insert failure, turning a primary-key violation into `AlreadyExists`.
pub(crate) fn insert_error(
    err: sqlx::Error,
    entity: &'static str,
    id: &EntityId,
) -> RepositoryError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            RepositoryError::already_exists(entity, id)
        }
        _ => RepositoryError::storage(err),
    }
}

pub(crate) fn to_i32(value: u32) -> Result<i32, RepositoryError> {
    i32::try_from(value).map_err(RepositoryError::storage)
}

pub(crate) fn to_u32(value: i32) -> Result<u32, RepositoryError> {
    u32::try_from(value).map_err(RepositoryError::storage)
}

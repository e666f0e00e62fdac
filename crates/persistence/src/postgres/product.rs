use async_trait::async_trait;
use common::EntityId;
use domain::repository::Result;
use domain::{Money, Product, Repository, RepositoryError};
use sqlx::{PgPool, Row, postgres::PgRow};

use super::insert_error;
use crate::record_operation;

const ENTITY: &str = "Product";

/// PostgreSQL-backed product repository. Prices are stored as cents.
#[derive(Clone)]
pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_product(row: PgRow) -> Result<Product> {
        let id: String = row.try_get("id").map_err(RepositoryError::storage)?;
        let name: String = row.try_get("name").map_err(RepositoryError::storage)?;
        let price: i64 = row.try_get("price").map_err(RepositoryError::storage)?;

        Product::new(id, name, Money::from_cents(price))
            .map_err(|source| RepositoryError::Corrupted { entity: ENTITY, source })
    }
}

#[async_trait]
impl Repository<Product> for PostgresProductRepository {
    #[tracing::instrument(skip(self, product), fields(id = %product.id()))]
    async fn create(&self, product: &Product) -> Result<()> {
        sqlx::query("INSERT INTO products (id, name, price) VALUES ($1, $2, $3)")
            .bind(product.id().as_str())
            .bind(product.name())
            .bind(product.price().cents())
            .execute(&self.pool)
            .await
            .map_err(|e| insert_error(e, ENTITY, product.id()))?;

        record_operation(ENTITY, "create");
        Ok(())
    }

    #[tracing::instrument(skip(self, product), fields(id = %product.id()))]
    async fn update(&self, product: &Product) -> Result<()> {
        let result = sqlx::query("UPDATE products SET name = $2, price = $3 WHERE id = $1")
            .bind(product.id().as_str())
            .bind(product.name())
            .bind(product.price().cents())
            .execute(&self.pool)
            .await
            .map_err(RepositoryError::storage)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found(ENTITY, product.id()));
        }

        record_operation(ENTITY, "update");
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn find(&self, id: &EntityId) -> Result<Product> {
        record_operation(ENTITY, "find");
        let row = sqlx::query("SELECT id, name, price FROM products WHERE id = $1")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(RepositoryError::storage)?
            .ok_or_else(|| RepositoryError::not_found(ENTITY, id))?;

        Self::row_to_product(row)
    }

    #[tracing::instrument(skip(self))]
    async fn find_all(&self) -> Result<Vec<Product>> {
        record_operation(ENTITY, "find_all");
        let rows = sqlx::query("SELECT id, name, price FROM products ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(RepositoryError::storage)?;

        rows.into_iter().map(Self::row_to_product).collect()
    }
}

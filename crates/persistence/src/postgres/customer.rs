use async_trait::async_trait;
use common::EntityId;
use domain::repository::Result;
use domain::{Address, Customer, Repository, RepositoryError};
use sqlx::{PgPool, Row, postgres::PgRow};

use super::{insert_error, to_i32, to_u32};
use crate::record_operation;

const ENTITY: &str = "Customer";

/// PostgreSQL-backed customer repository.
#[derive(Clone)]
pub struct PostgresCustomerRepository {
    pool: PgPool,
}

impl PostgresCustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn row_to_customer(row: PgRow) -> Result<Customer> {
        let street: Option<String> = row.try_get("street").map_err(RepositoryError::storage)?;
        let address = match street {
            Some(street) => {
                let number: i32 = row.try_get("number").map_err(RepositoryError::storage)?;
                let zip: String = row.try_get("zipcode").map_err(RepositoryError::storage)?;
                let city: String = row.try_get("city").map_err(RepositoryError::storage)?;
                let address = Address::new(street, to_u32(number)?, zip, city)
                    .map_err(|source| RepositoryError::Corrupted { entity: ENTITY, source })?;
                Some(address)
            }
            None => None,
        };

        let id: String = row.try_get("id").map_err(RepositoryError::storage)?;
        let name: String = row.try_get("name").map_err(RepositoryError::storage)?;
        let active: bool = row.try_get("active").map_err(RepositoryError::storage)?;
        let points: i64 = row.try_get("reward_points").map_err(RepositoryError::storage)?;
        let points = u64::try_from(points).map_err(RepositoryError::storage)?;

        Customer::restore(id, name, address, active, points)
            .map_err(|source| RepositoryError::Corrupted { entity: ENTITY, source })
    }
}

/// Address columns as bound to a statement; all `NULL` when there is no address.
type AddressColumns<'a> = (Option<&'a str>, Option<i32>, Option<&'a str>, Option<&'a str>);

fn address_columns(customer: &Customer) -> Result<AddressColumns<'_>> {
    match customer.address() {
        Some(address) => Ok((
            Some(address.street()),
            Some(to_i32(address.number())?),
            Some(address.zip()),
            Some(address.city()),
        )),
        None => Ok((None, None, None, None)),
    }
}

fn points_column(customer: &Customer) -> Result<i64> {
    i64::try_from(customer.reward_points()).map_err(RepositoryError::storage)
}

#[async_trait]
impl Repository<Customer> for PostgresCustomerRepository {
    #[tracing::instrument(skip(self, customer), fields(id = %customer.id()))]
    async fn create(&self, customer: &Customer) -> Result<()> {
        let (street, number, zip, city) = address_columns(customer)?;

        sqlx::query(
            r#"
            INSERT INTO customers (id, name, street, number, zipcode, city, active, reward_points)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(customer.id().as_str())
        .bind(customer.name())
        .bind(street)
        .bind(number)
        .bind(zip)
        .bind(city)
        .bind(customer.is_active())
        .bind(points_column(customer)?)
        .execute(&self.pool)
        .await
        .map_err(|e| insert_error(e, ENTITY, customer.id()))?;

        record_operation(ENTITY, "create");
        Ok(())
    }

    #[tracing::instrument(skip(self, customer), fields(id = %customer.id()))]
    async fn update(&self, customer: &Customer) -> Result<()> {
        let (street, number, zip, city) = address_columns(customer)?;

        let result = sqlx::query(
            r#"
            UPDATE customers
            SET name = $2, street = $3, number = $4, zipcode = $5, city = $6,
                active = $7, reward_points = $8
            WHERE id = $1
            "#,
        )
        .bind(customer.id().as_str())
        .bind(customer.name())
        .bind(street)
        .bind(number)
        .bind(zip)
        .bind(city)
        .bind(customer.is_active())
        .bind(points_column(customer)?)
        .execute(&self.pool)
        .await
        .map_err(RepositoryError::storage)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found(ENTITY, customer.id()));
        }

        record_operation(ENTITY, "update");
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn find(&self, id: &EntityId) -> Result<Customer> {
        record_operation(ENTITY, "find");
        let row = sqlx::query(
            r#"
            SELECT id, name, street, number, zipcode, city, active, reward_points
            FROM customers
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(RepositoryError::storage)?
        .ok_or_else(|| RepositoryError::not_found(ENTITY, id))?;

        Self::row_to_customer(row)
    }

    #[tracing::instrument(skip(self))]
    async fn find_all(&self) -> Result<Vec<Customer>> {
        record_operation(ENTITY, "find_all");
        let rows = sqlx::query(
            r#"
            SELECT id, name, street, number, zipcode, city, active, reward_points
            FROM customers
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(RepositoryError::storage)?;

        rows.into_iter().map(Self::row_to_customer).collect()
    }
}

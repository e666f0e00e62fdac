use std::collections::HashMap;

use async_trait::async_trait;
use common::EntityId;
use domain::repository::Result;
use domain::{Money, Order, OrderItem, Repository, RepositoryError};
use sqlx::{PgPool, Postgres, Row, Transaction, postgres::PgRow};

use super::{insert_error, to_i32, to_u32};
use crate::record_operation;

const ENTITY: &str = "Order";
const ITEM_ENTITY: &str = "OrderItem";

/// PostgreSQL-backed order repository.
///
/// An order is stored as a header row in `orders` plus one `order_items` row
/// per item. Item prices are unit prices in cents; `position` keeps the item
/// order. Writes to both tables happen in a single transaction.
#[derive(Clone)]
pub struct PostgresOrderRepository {
    pool: PgPool,
}

impl PostgresOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_item(row: &PgRow) -> Result<OrderItem> {
        let id: String = row.try_get("id").map_err(RepositoryError::storage)?;
        let name: String = row.try_get("name").map_err(RepositoryError::storage)?;
        let price: i64 = row.try_get("price").map_err(RepositoryError::storage)?;
        let product_id: String = row.try_get("product_id").map_err(RepositoryError::storage)?;
        let quantity: i32 = row.try_get("quantity").map_err(RepositoryError::storage)?;

        OrderItem::new(id, name, Money::from_cents(price), product_id, to_u32(quantity)?)
            .map_err(|source| RepositoryError::Corrupted {
                entity: ITEM_ENTITY,
                source,
            })
    }

    fn build_order(id: String, customer_id: String, items: Vec<OrderItem>) -> Result<Order> {
        Order::new(id, customer_id, items)
            .map_err(|source| RepositoryError::Corrupted { entity: ENTITY, source })
    }

    async fn upsert_items(tx: &mut Transaction<'_, Postgres>, order: &Order) -> Result<()> {
        for (position, item) in order.items().iter().enumerate() {
            let position = i32::try_from(position).map_err(RepositoryError::storage)?;
            let result = sqlx::query(
                r#"
                INSERT INTO order_items (id, order_id, product_id, name, price, quantity, position)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                ON CONFLICT (id) DO UPDATE
                SET product_id = EXCLUDED.product_id,
                    name = EXCLUDED.name,
                    price = EXCLUDED.price,
                    quantity = EXCLUDED.quantity,
                    position = EXCLUDED.position
                WHERE order_items.order_id = EXCLUDED.order_id
                "#,
            )
            .bind(item.id().as_str())
            .bind(order.id().as_str())
            .bind(item.product_id().as_str())
            .bind(item.name())
            .bind(item.price().cents())
            .bind(to_i32(item.quantity())?)
            .bind(position)
            .execute(&mut **tx)
            .await
            .map_err(RepositoryError::storage)?;

            // The conflict guard skips rows owned by another order.
            if result.rows_affected() == 0 {
                return Err(RepositoryError::already_exists(ITEM_ENTITY, item.id()));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl Repository<Order> for PostgresOrderRepository {
    #[tracing::instrument(skip(self, order), fields(id = %order.id(), items = order.item_count()))]
    async fn create(&self, order: &Order) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(RepositoryError::storage)?;

        sqlx::query("INSERT INTO orders (id, customer_id, total) VALUES ($1, $2, $3)")
            .bind(order.id().as_str())
            .bind(order.customer_id().as_str())
            .bind(order.total().cents())
            .execute(&mut *tx)
            .await
            .map_err(|e| insert_error(e, ENTITY, order.id()))?;

        for (position, item) in order.items().iter().enumerate() {
            let position = i32::try_from(position).map_err(RepositoryError::storage)?;
            sqlx::query(
                r#"
                INSERT INTO order_items (id, order_id, product_id, name, price, quantity, position)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(item.id().as_str())
            .bind(order.id().as_str())
            .bind(item.product_id().as_str())
            .bind(item.name())
            .bind(item.price().cents())
            .bind(to_i32(item.quantity())?)
            .bind(position)
            .execute(&mut *tx)
            .await
            .map_err(|e| insert_error(e, ITEM_ENTITY, item.id()))?;
        }

        tx.commit().await.map_err(RepositoryError::storage)?;
        record_operation(ENTITY, "create");
        Ok(())
    }

    #[tracing::instrument(skip(self, order), fields(id = %order.id(), items = order.item_count()))]
    async fn update(&self, order: &Order) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(RepositoryError::storage)?;

        let result = sqlx::query("UPDATE orders SET customer_id = $2, total = $3 WHERE id = $1")
            .bind(order.id().as_str())
            .bind(order.customer_id().as_str())
            .bind(order.total().cents())
            .execute(&mut *tx)
            .await
            .map_err(RepositoryError::storage)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found(ENTITY, order.id()));
        }

        Self::upsert_items(&mut tx, order).await?;

        let item_ids: Vec<String> = order
            .items()
            .iter()
            .map(|item| item.id().as_str().to_owned())
            .collect();
        sqlx::query("DELETE FROM order_items WHERE order_id = $1 AND NOT (id = ANY($2))")
            .bind(order.id().as_str())
            .bind(item_ids)
            .execute(&mut *tx)
            .await
            .map_err(RepositoryError::storage)?;

        tx.commit().await.map_err(RepositoryError::storage)?;
        record_operation(ENTITY, "update");
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn find(&self, id: &EntityId) -> Result<Order> {
        record_operation(ENTITY, "find");
        let row = sqlx::query("SELECT id, customer_id FROM orders WHERE id = $1")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(RepositoryError::storage)?
            .ok_or_else(|| RepositoryError::not_found(ENTITY, id))?;

        let item_rows = sqlx::query(
            r#"
            SELECT id, product_id, name, price, quantity
            FROM order_items
            WHERE order_id = $1
            ORDER BY position
            "#,
        )
        .bind(id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(RepositoryError::storage)?;

        let items = item_rows
            .iter()
            .map(Self::row_to_item)
            .collect::<Result<Vec<_>>>()?;

        Self::build_order(
            row.try_get("id").map_err(RepositoryError::storage)?,
            row.try_get("customer_id").map_err(RepositoryError::storage)?,
            items,
        )
    }

    #[tracing::instrument(skip(self))]
    async fn find_all(&self) -> Result<Vec<Order>> {
        record_operation(ENTITY, "find_all");
        let order_rows = sqlx::query("SELECT id, customer_id FROM orders ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(RepositoryError::storage)?;

        let item_rows = sqlx::query(
            r#"
            SELECT id, order_id, product_id, name, price, quantity
            FROM order_items
            ORDER BY order_id, position
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(RepositoryError::storage)?;

        let mut items_by_order: HashMap<String, Vec<OrderItem>> = HashMap::new();
        for row in &item_rows {
            let order_id: String = row.try_get("order_id").map_err(RepositoryError::storage)?;
            items_by_order
                .entry(order_id)
                .or_default()
                .push(Self::row_to_item(row)?);
        }

        order_rows
            .into_iter()
            .map(|row| {
                let id: String = row.try_get("id").map_err(RepositoryError::storage)?;
                let customer_id: String =
                    row.try_get("customer_id").map_err(RepositoryError::storage)?;
                let items = items_by_order.remove(&id).unwrap_or_default();
                Self::build_order(id, customer_id, items)
            })
            .collect()
    }
}

//! SQLite storage implementation.
//!
//! Entities are stored as JSON payloads next to the key and sort columns.

use std::str::FromStr;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{Sqlite, Transaction};
use storefront_api::{date, Order, OrderId, OrderNote, SiteId};

use super::{Result, StorageError, StorageManager};

/// SQLite-backed local storage.
pub struct SqliteStorage {
    pool: SqlitePool,
}

impl SqliteStorage {
    /// Opens (creating if needed) the database at `database_url`.
    ///
    /// # Example URLs
    /// - `sqlite://storefront.db` - File-based database
    /// - `sqlite::memory:` - In-memory database (ephemeral)
    pub async fn new(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);

        // An in-memory database lives and dies with its connection.
        let pool = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            SqlitePoolOptions::new()
                .max_connections(5)
                .connect_with(options)
                .await?
        };

        let storage = Self { pool };
        storage.run_migrations().await?;
        Ok(storage)
    }

    /// Create an in-memory SQLite storage (for testing).
    pub async fn in_memory() -> Result<Self> {
        Self::new("sqlite::memory:").await
    }

    async fn run_migrations(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS orders (
                site_id INTEGER NOT NULL,
                order_id INTEGER NOT NULL,
                status TEXT NOT NULL,
                date_created TEXT NOT NULL,
                payload TEXT NOT NULL,
                PRIMARY KEY (site_id, order_id)
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS order_notes (
                site_id INTEGER NOT NULL,
                order_id INTEGER NOT NULL,
                note_id INTEGER NOT NULL,
                date_created TEXT NOT NULL,
                payload TEXT NOT NULL,
                PRIMARY KEY (site_id, order_id, note_id),
                FOREIGN KEY (site_id, order_id)
                    REFERENCES orders (site_id, order_id) ON DELETE CASCADE
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn encode<T: serde::Serialize>(entity: &T) -> Result<String> {
    serde_json::to_string(entity).map_err(|e| StorageError::Corrupt(e.to_string()))
}

fn decode<T: DeserializeOwned>(payload: &str) -> Result<T> {
    serde_json::from_str(payload).map_err(|e| StorageError::Corrupt(e.to_string()))
}

// ON CONFLICT updates in place; REPLACE would delete the row and cascade to notes.
async fn upsert_order_in(tx: &mut Transaction<'_, Sqlite>, order: &Order) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO orders (site_id, order_id, status, date_created, payload)
        VALUES (?, ?, ?, ?, ?)
        ON CONFLICT (site_id, order_id) DO UPDATE SET
            status = excluded.status,
            date_created = excluded.date_created,
            payload = excluded.payload
        "#,
    )
    .bind(order.site_id)
    .bind(order.order_id)
    .bind(order.status.as_str())
    .bind(date::format(&order.date_created))
    .bind(encode(order)?)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

async fn upsert_note_in(tx: &mut Transaction<'_, Sqlite>, note: &OrderNote) -> Result<bool> {
    let parents: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM orders WHERE site_id = ? AND order_id = ?",
    )
    .bind(note.site_id)
    .bind(note.order_id)
    .fetch_one(&mut **tx)
    .await?;

    if parents == 0 {
        return Ok(false);
    }

    sqlx::query(
        r#"
        INSERT INTO order_notes (site_id, order_id, note_id, date_created, payload)
        VALUES (?, ?, ?, ?, ?)
        ON CONFLICT (site_id, order_id, note_id) DO UPDATE SET
            date_created = excluded.date_created,
            payload = excluded.payload
        "#,
    )
    .bind(note.site_id)
    .bind(note.order_id)
    .bind(note.note_id)
    .bind(date::format(&note.date_created))
    .bind(encode(note)?)
    .execute(&mut **tx)
    .await?;
    Ok(true)
}

#[async_trait]
impl StorageManager for SqliteStorage {
    async fn upsert_order(&self, order: &Order) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        upsert_order_in(&mut tx, order).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn upsert_orders(&self, orders: &[Order]) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        for order in orders {
            upsert_order_in(&mut tx, order).await?;
        }
        tx.commit().await?;
        Ok(())
    }

    async fn load_order(&self, site_id: SiteId, order_id: OrderId) -> Result<Option<Order>> {
        let payload: Option<String> = sqlx::query_scalar(
            "SELECT payload FROM orders WHERE site_id = ? AND order_id = ?",
        )
        .bind(site_id)
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await?;

        payload.as_deref().map(decode::<Order>).transpose()
    }

    async fn load_orders(&self, site_id: SiteId) -> Result<Vec<Order>> {
        let payloads: Vec<String> = sqlx::query_scalar(
            "SELECT payload FROM orders WHERE site_id = ? ORDER BY date_created DESC, order_id DESC",
        )
        .bind(site_id)
        .fetch_all(&self.pool)
        .await?;

        payloads.iter().map(|p| decode(p)).collect()
    }

    async fn delete_orders(&self, site_id: SiteId) -> Result<u64> {
        let result = sqlx::query("DELETE FROM orders WHERE site_id = ?")
            .bind(site_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn upsert_order_note(&self, note: &OrderNote) -> Result<bool> {
        let mut tx = self.pool.begin().await?;
        let stored = upsert_note_in(&mut tx, note).await?;
        tx.commit().await?;
        Ok(stored)
    }

    async fn upsert_order_notes(&self, notes: &[OrderNote]) -> Result<usize> {
        let mut tx = self.pool.begin().await?;
        let mut kept = 0;
        for note in notes {
            if upsert_note_in(&mut tx, note).await? {
                kept += 1;
            }
        }
        tx.commit().await?;
        Ok(kept)
    }

    async fn load_order_notes(
        &self,
        site_id: SiteId,
        order_id: OrderId,
    ) -> Result<Vec<OrderNote>> {
        let payloads: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT payload FROM order_notes
            WHERE site_id = ? AND order_id = ?
            ORDER BY date_created DESC, note_id DESC
            "#,
        )
        .bind(site_id)
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        payloads.iter().map(|p| decode(p)).collect()
    }

    async fn reset(&self) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM order_notes").execute(&mut *tx).await?;
        sqlx::query("DELETE FROM orders").execute(&mut *tx).await?;
        tx.commit().await?;
        Ok(())
    }
}

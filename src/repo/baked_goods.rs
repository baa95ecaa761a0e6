//! `baked_goods` table: price-ranked reads, lookup, insert, delete.

use super::BAKED_GOOD_COLUMNS;
use crate::models::{BakedGood, NewBakedGood};
use chrono::Utc;
use sqlx::SqliteConnection;

/// Ordering for every price-ranked read. Equal prices fall back to creation order.
const BY_PRICE_DESC: &str = "ORDER BY price DESC, id ASC";

pub struct BakedGoodRepo;

impl BakedGoodRepo {
    pub async fn by_price_desc(conn: &mut SqliteConnection) -> Result<Vec<BakedGood>, sqlx::Error> {
        let sql = format!("SELECT {} FROM baked_goods {}", BAKED_GOOD_COLUMNS, BY_PRICE_DESC);
        tracing::debug!(sql = %sql, "query");
        sqlx::query_as(&sql).fetch_all(&mut *conn).await
    }

    /// Head of [`Self::by_price_desc`], or None on an empty table.
    pub async fn most_expensive(conn: &mut SqliteConnection) -> Result<Option<BakedGood>, sqlx::Error> {
        let sql = format!("SELECT {} FROM baked_goods {} LIMIT 1", BAKED_GOOD_COLUMNS, BY_PRICE_DESC);
        tracing::debug!(sql = %sql, "query");
        sqlx::query_as(&sql).fetch_optional(&mut *conn).await
    }

    pub async fn for_bakery(conn: &mut SqliteConnection, bakery_id: i64) -> Result<Vec<BakedGood>, sqlx::Error> {
        let sql = format!("SELECT {} FROM baked_goods WHERE bakery_id = ? ORDER BY id", BAKED_GOOD_COLUMNS);
        tracing::debug!(sql = %sql, bakery_id, "query");
        sqlx::query_as(&sql).bind(bakery_id).fetch_all(&mut *conn).await
    }

    pub async fn find(conn: &mut SqliteConnection, id: i64) -> Result<Option<BakedGood>, sqlx::Error> {
        let sql = format!("SELECT {} FROM baked_goods WHERE id = ?", BAKED_GOOD_COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        sqlx::query_as(&sql).bind(id).fetch_optional(&mut *conn).await
    }

    pub async fn insert(conn: &mut SqliteConnection, new: &NewBakedGood) -> Result<BakedGood, sqlx::Error> {
        let now = Utc::now();
        let sql = format!(
            "INSERT INTO baked_goods (name, price, bakery_id, created_at, updated_at) VALUES (?, ?, ?, ?, ?) RETURNING {}",
            BAKED_GOOD_COLUMNS
        );
        tracing::debug!(sql = %sql, bakery_id = new.bakery_id, "query");
        sqlx::query_as(&sql)
            .bind(&new.name)
            .bind(new.price)
            .bind(new.bakery_id)
            .bind(now)
            .bind(now)
            .fetch_one(&mut *conn)
            .await
    }

    /// True when a row was removed.
    pub async fn delete(conn: &mut SqliteConnection, id: i64) -> Result<bool, sqlx::Error> {
        tracing::debug!(id, "delete baked good");
        let result = sqlx::query("DELETE FROM baked_goods WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count(conn: &mut SqliteConnection) -> Result<i64, sqlx::Error> {
        let (n,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM baked_goods")
            .fetch_one(&mut *conn)
            .await?;
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::BakeryRepo;
    use crate::store::{ensure_tables, in_memory};

    async fn seeded() -> (sqlx::pool::PoolConnection<sqlx::Sqlite>, i64) {
        let pool = in_memory().await.unwrap();
        ensure_tables(&pool).await.unwrap();
        let mut conn = pool.acquire().await.unwrap();
        let bakery = BakeryRepo::insert(&mut conn, "Rise").await.unwrap();
        (conn, bakery.id)
    }

    fn good(name: &str, price: f64, bakery_id: i64) -> NewBakedGood {
        NewBakedGood { name: name.into(), price, bakery_id }
    }

    #[tokio::test]
    async fn price_order_breaks_ties_by_id() {
        let (mut conn, bakery) = seeded().await;
        let cheap = BakedGoodRepo::insert(&mut conn, &good("Roll", 1.0, bakery)).await.unwrap();
        let first = BakedGoodRepo::insert(&mut conn, &good("Cake", 9.5, bakery)).await.unwrap();
        let second = BakedGoodRepo::insert(&mut conn, &good("Torte", 9.5, bakery)).await.unwrap();

        let ids: Vec<i64> = BakedGoodRepo::by_price_desc(&mut conn).await.unwrap().iter().map(|g| g.id).collect();
        assert_eq!(ids, vec![first.id, second.id, cheap.id]);
        assert_eq!(BakedGoodRepo::most_expensive(&mut conn).await.unwrap(), Some(first));
    }

    #[tokio::test]
    async fn empty_table() {
        let (mut conn, _) = seeded().await;
        assert!(BakedGoodRepo::by_price_desc(&mut conn).await.unwrap().is_empty());
        assert!(BakedGoodRepo::most_expensive(&mut conn).await.unwrap().is_none());
        assert_eq!(BakedGoodRepo::count(&mut conn).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn insert_returns_stored_row() {
        let (mut conn, bakery) = seeded().await;
        let created = BakedGoodRepo::insert(&mut conn, &good("Croissant", 3.5, bakery)).await.unwrap();
        assert_eq!(created.name, "Croissant");
        assert_eq!(created.price, 3.5);
        assert_eq!(created.bakery_id, bakery);
        assert_eq!(BakedGoodRepo::find(&mut conn, created.id).await.unwrap(), Some(created));
    }

    #[tokio::test]
    async fn delete_removes_once() {
        let (mut conn, bakery) = seeded().await;
        let created = BakedGoodRepo::insert(&mut conn, &good("Croissant", 3.5, bakery)).await.unwrap();
        assert!(BakedGoodRepo::delete(&mut conn, created.id).await.unwrap());
        assert!(!BakedGoodRepo::delete(&mut conn, created.id).await.unwrap());
        assert!(BakedGoodRepo::find(&mut conn, created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn negative_price_violates_check() {
        let (mut conn, bakery) = seeded().await;
        let err = BakedGoodRepo::insert(&mut conn, &good("Debt", -1.0, bakery)).await.unwrap_err();
        assert!(matches!(err, sqlx::Error::Database(_)));
    }
}

//! `bakeries` table: listing with nested goods, lookup, rename, insert.

use super::{BakedGoodRepo, BAKED_GOOD_COLUMNS, BAKERY_COLUMNS};
use crate::models::{BakedGood, Bakery, BakeryWithGoods};
use chrono::{DateTime, Utc};
use sqlx::SqliteConnection;
use std::collections::HashMap;

pub struct BakeryRepo;

impl BakeryRepo {
    /// All bakeries by id, each with its baked goods in creation order. Two queries regardless of size.
    pub async fn all(conn: &mut SqliteConnection) -> Result<Vec<BakeryWithGoods>, sqlx::Error> {
        let sql = format!("SELECT {} FROM bakeries ORDER BY id", BAKERY_COLUMNS);
        tracing::debug!(sql = %sql, "query");
        let bakeries: Vec<Bakery> = sqlx::query_as(&sql).fetch_all(&mut *conn).await?;

        let sql = format!("SELECT {} FROM baked_goods ORDER BY id", BAKED_GOOD_COLUMNS);
        tracing::debug!(sql = %sql, "query");
        let goods: Vec<BakedGood> = sqlx::query_as(&sql).fetch_all(&mut *conn).await?;

        let mut by_bakery: HashMap<i64, Vec<BakedGood>> = goods.into_iter().fold(HashMap::new(), |mut m, g| {
            m.entry(g.bakery_id).or_default().push(g);
            m
        });
        Ok(bakeries
            .into_iter()
            .map(|bakery| {
                let baked_goods = by_bakery.remove(&bakery.id).unwrap_or_default();
                BakeryWithGoods { bakery, baked_goods }
            })
            .collect())
    }

    pub async fn find(conn: &mut SqliteConnection, id: i64) -> Result<Option<Bakery>, sqlx::Error> {
        let sql = format!("SELECT {} FROM bakeries WHERE id = ?", BAKERY_COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        sqlx::query_as(&sql).bind(id).fetch_optional(&mut *conn).await
    }

    pub async fn find_with_goods(
        conn: &mut SqliteConnection,
        id: i64,
    ) -> Result<Option<BakeryWithGoods>, sqlx::Error> {
        let Some(bakery) = Self::find(conn, id).await? else {
            return Ok(None);
        };
        let baked_goods = BakedGoodRepo::for_bakery(conn, id).await?;
        Ok(Some(BakeryWithGoods { bakery, baked_goods }))
    }

    pub async fn exists(conn: &mut SqliteConnection, id: i64) -> Result<bool, sqlx::Error> {
        let found: Option<(i64,)> = sqlx::query_as("SELECT id FROM bakeries WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(found.is_some())
    }

    /// Set `name` and `updated_at`. Returns the updated row, or None when `id` is unknown.
    pub async fn rename(
        conn: &mut SqliteConnection,
        id: i64,
        name: &str,
        at: DateTime<Utc>,
    ) -> Result<Option<Bakery>, sqlx::Error> {
        let sql = format!(
            "UPDATE bakeries SET name = ?, updated_at = ? WHERE id = ? RETURNING {}",
            BAKERY_COLUMNS
        );
        tracing::debug!(sql = %sql, id, "query");
        sqlx::query_as(&sql)
            .bind(name)
            .bind(at)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// No HTTP route creates bakeries; used for seeding.
    pub async fn insert(conn: &mut SqliteConnection, name: &str) -> Result<Bakery, sqlx::Error> {
        let now = Utc::now();
        let sql = format!(
            "INSERT INTO bakeries (name, created_at, updated_at) VALUES (?, ?, ?) RETURNING {}",
            BAKERY_COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        sqlx::query_as(&sql)
            .bind(name)
            .bind(now)
            .bind(now)
            .fetch_one(&mut *conn)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewBakedGood;
    use crate::store::{ensure_tables, in_memory};

    async fn conn() -> sqlx::pool::PoolConnection<sqlx::Sqlite> {
        let pool = in_memory().await.unwrap();
        ensure_tables(&pool).await.unwrap();
        pool.acquire().await.unwrap()
    }

    fn good(name: &str, price: f64, bakery_id: i64) -> NewBakedGood {
        NewBakedGood { name: name.into(), price, bakery_id }
    }

    #[tokio::test]
    async fn all_nests_goods_under_their_bakery() {
        let mut conn = conn().await;
        let a = BakeryRepo::insert(&mut conn, "Delightful Donuts").await.unwrap();
        let b = BakeryRepo::insert(&mut conn, "Incredible Crullers").await.unwrap();
        let empty = BakeryRepo::insert(&mut conn, "Empty Shelves").await.unwrap();
        BakedGoodRepo::insert(&mut conn, &good("Chocolate dipped donut", 2.75, a.id)).await.unwrap();
        BakedGoodRepo::insert(&mut conn, &good("Apple-spice filled donut", 3.5, b.id)).await.unwrap();
        BakedGoodRepo::insert(&mut conn, &good("Honey glazed", 1.25, a.id)).await.unwrap();

        let all = BakeryRepo::all(&mut conn).await.unwrap();
        let ids: Vec<i64> = all.iter().map(|b| b.bakery.id).collect();
        assert_eq!(ids, vec![a.id, b.id, empty.id]);
        let names: Vec<&str> = all[0].baked_goods.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Chocolate dipped donut", "Honey glazed"]);
        assert_eq!(all[1].baked_goods.len(), 1);
        assert!(all[2].baked_goods.is_empty());
    }

    #[tokio::test]
    async fn find_and_exists() {
        let mut conn = conn().await;
        let bakery = BakeryRepo::insert(&mut conn, "Rise").await.unwrap();
        assert_eq!(BakeryRepo::find(&mut conn, bakery.id).await.unwrap(), Some(bakery.clone()));
        assert!(BakeryRepo::exists(&mut conn, bakery.id).await.unwrap());
        assert!(!BakeryRepo::exists(&mut conn, bakery.id + 1).await.unwrap());
        assert!(BakeryRepo::find_with_goods(&mut conn, bakery.id + 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn rename_sets_name_and_timestamp() {
        let mut conn = conn().await;
        let bakery = BakeryRepo::insert(&mut conn, "Rise").await.unwrap();
        let at = bakery.updated_at + chrono::Duration::seconds(5);
        let renamed = BakeryRepo::rename(&mut conn, bakery.id, "Fall", at).await.unwrap().unwrap();
        assert_eq!(renamed.name, "Fall");
        assert_eq!(renamed.updated_at, at);
        assert_eq!(renamed.created_at, bakery.created_at);
        assert!(BakeryRepo::rename(&mut conn, bakery.id + 1, "X", at).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_name_is_unique_violation() {
        let mut conn = conn().await;
        BakeryRepo::insert(&mut conn, "Rise").await.unwrap();
        let other = BakeryRepo::insert(&mut conn, "Fall").await.unwrap();
        let err = BakeryRepo::rename(&mut conn, other.id, "Rise", Utc::now()).await.unwrap_err();
        match err {
            sqlx::Error::Database(db) => assert!(db.is_unique_violation()),
            other => panic!("unexpected error {other:?}"),
        }
    }
}

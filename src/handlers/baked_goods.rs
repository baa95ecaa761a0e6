//! Baked good handlers: price-ranked reads, single read, create, delete.

use super::finish;
use crate::error::AppError;
use crate::extractors::{EntityId, FormBody};
use crate::models::{BakedGood, BakedGoodForm, NewBakedGood};
use crate::repo::{BakedGoodRepo, BakeryRepo};
use crate::response;
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse};
use sqlx::SqliteConnection;

const CONFLICT: &str = "Baked good name must be unique";

pub async fn by_price(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let mut conn = state.pool.acquire().await.map_err(AppError::read("load baked goods"))?;
    let goods = BakedGoodRepo::by_price_desc(&mut conn)
        .await
        .map_err(AppError::read("load baked goods"))?;
    Ok(response::ok(goods))
}

pub async fn most_expensive(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let mut conn = state.pool.acquire().await.map_err(AppError::read("load baked goods"))?;
    let good = BakedGoodRepo::most_expensive(&mut conn)
        .await
        .map_err(AppError::read("load baked goods"))?
        .ok_or_else(|| AppError::NotFound("no baked goods".into()))?;
    Ok(response::ok(good))
}

pub async fn read(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = state.pool.acquire().await.map_err(AppError::read("load baked good"))?;
    let good = BakedGoodRepo::find(&mut conn, id)
        .await
        .map_err(AppError::read("load baked good"))?
        .ok_or_else(|| AppError::NotFound(format!("baked good {}", id)))?;
    Ok(response::ok(good))
}

pub async fn create(
    State(state): State<AppState>,
    FormBody(form): FormBody<BakedGoodForm>,
) -> Result<impl IntoResponse, AppError> {
    let new = form.validate()?;
    let mut tx = state.pool.begin().await.map_err(AppError::read("create baked good"))?;
    let outcome = insert(&mut tx, &new).await;
    let created = finish(tx, outcome, "create baked good", Some(CONFLICT)).await?;
    tracing::info!(id = created.id, bakery_id = created.bakery_id, "baked good created");
    Ok(response::created(created))
}

async fn insert(conn: &mut SqliteConnection, new: &NewBakedGood) -> Result<BakedGood, AppError> {
    if !BakeryRepo::exists(conn, new.bakery_id)
        .await
        .map_err(AppError::read("create baked good"))?
    {
        return Err(AppError::NotFound(format!("bakery {}", new.bakery_id)));
    }
    BakedGoodRepo::insert(conn, new)
        .await
        .map_err(AppError::write("create baked good", CONFLICT))
}

pub async fn delete(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<impl IntoResponse, AppError> {
    let mut tx = state.pool.begin().await.map_err(AppError::read("delete baked good"))?;
    let outcome = remove(&mut tx, id).await;
    finish(tx, outcome, "delete baked good", None).await?;
    tracing::info!(id, "baked good deleted");
    Ok(response::message(format!("Baked good with id {} successfully deleted", id)))
}

async fn remove(conn: &mut SqliteConnection, id: i64) -> Result<(), AppError> {
    let removed = BakedGoodRepo::delete(conn, id)
        .await
        .map_err(AppError::read("delete baked good"))?;
    if removed {
        Ok(())
    } else {
        Err(AppError::NotFound(format!("baked good {}", id)))
    }
}

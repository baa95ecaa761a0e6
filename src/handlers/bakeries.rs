//! Bakery handlers: list, read, rename.

use super::finish;
use crate::error::AppError;
use crate::extractors::{EntityId, FormBody};
use crate::models::{BakeryUpdate, BakeryWithGoods};
use crate::repo::BakeryRepo;
use crate::response;
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse};
use chrono::Utc;
use sqlx::SqliteConnection;

const CONFLICT: &str = "Name must be unique";

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let mut tx = state.pool.begin().await.map_err(AppError::read("load bakeries"))?;
    let bakeries = BakeryRepo::all(&mut tx).await.map_err(AppError::read("load bakeries"))?;
    tx.commit().await.map_err(AppError::read("load bakeries"))?;
    Ok(response::ok(bakeries))
}

pub async fn read(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<impl IntoResponse, AppError> {
    let mut tx = state.pool.begin().await.map_err(AppError::read("load bakery"))?;
    let bakery = BakeryRepo::find_with_goods(&mut tx, id)
        .await
        .map_err(AppError::read("load bakery"))?
        .ok_or_else(|| AppError::NotFound(format!("bakery {}", id)))?;
    tx.commit().await.map_err(AppError::read("load bakery"))?;
    Ok(response::ok(bakery))
}

/// The id is resolved before the body is looked at, so an unknown bakery is 404 whatever was sent.
pub async fn update(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    form: Result<FormBody<BakeryUpdate>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let mut tx = state.pool.begin().await.map_err(AppError::read("update bakery"))?;
    let outcome = rename(&mut tx, id, form).await;
    let bakery = finish(tx, outcome, "update bakery", Some(CONFLICT)).await?;
    tracing::info!(id, name = %bakery.bakery.name, "bakery renamed");
    Ok(response::ok(bakery))
}

async fn rename(
    conn: &mut SqliteConnection,
    id: i64,
    form: Result<FormBody<BakeryUpdate>, AppError>,
) -> Result<BakeryWithGoods, AppError> {
    if !BakeryRepo::exists(conn, id).await.map_err(AppError::read("update bakery"))? {
        return Err(AppError::NotFound(format!("bakery {}", id)));
    }
    let FormBody(update) = form?;
    let name = update.into_name()?;
    BakeryRepo::rename(conn, id, &name, Utc::now())
        .await
        .map_err(AppError::write("update bakery", CONFLICT))?
        .ok_or_else(|| AppError::NotFound(format!("bakery {}", id)))?;
    BakeryRepo::find_with_goods(conn, id)
        .await
        .map_err(AppError::read("update bakery"))?
        .ok_or_else(|| AppError::NotFound(format!("bakery {}", id)))
}

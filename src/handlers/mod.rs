//! HTTP handlers: one module per resource plus the banner and fallbacks.

pub mod baked_goods;
pub mod bakeries;
pub mod common;

use crate::error::AppError;
use sqlx::{Sqlite, Transaction};

/// Commit when `outcome` succeeded; otherwise roll back before handing the error on,
/// so a failed write never leaves a partial mutation behind. `conflict` is the message
/// for a unique violation at commit, on writes that can raise one.
pub(crate) async fn finish<T>(
    tx: Transaction<'static, Sqlite>,
    outcome: Result<T, AppError>,
    operation: &'static str,
    conflict: Option<&'static str>,
) -> Result<T, AppError> {
    match outcome {
        Ok(value) => {
            let committed = tx.commit().await;
            match conflict {
                Some(conflict) => committed.map_err(AppError::write(operation, conflict))?,
                None => committed.map_err(AppError::read(operation))?,
            }
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback) = tx.rollback().await {
                tracing::error!(error = %rollback, operation, "rollback failed");
            }
            Err(err)
        }
    }
}

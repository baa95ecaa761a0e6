//! Row types, their transfer representation, and the form payloads that create or change them.

use crate::error::AppError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Bakery {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct BakedGood {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub bakery_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A bakery as served over HTTP: its own fields plus its baked goods in creation order.
#[derive(Debug, Clone, Serialize)]
pub struct BakeryWithGoods {
    #[serde(flatten)]
    pub bakery: Bakery,
    pub baked_goods: Vec<BakedGood>,
}

/// PATCH /bakeries/{id} body.
#[derive(Debug, Default, Deserialize)]
pub struct BakeryUpdate {
    pub name: Option<String>,
}

impl BakeryUpdate {
    pub fn into_name(self) -> Result<String, AppError> {
        self.name
            .ok_or_else(|| AppError::BadRequest("Missing 'name' field in request body for update".into()))
    }
}

/// POST /baked_goods body, fields still as sent.
#[derive(Debug, Default, Deserialize)]
pub struct BakedGoodForm {
    pub name: Option<String>,
    pub price: Option<String>,
    pub bakery_id: Option<String>,
}

/// A validated baked good ready for insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBakedGood {
    pub name: String,
    pub price: f64,
    pub bakery_id: i64,
}

impl BakedGoodForm {
    /// Presence first, then `price`, then `bakery_id`.
    pub fn validate(self) -> Result<NewBakedGood, AppError> {
        let (Some(name), Some(price), Some(bakery_id)) = (self.name, self.price, self.bakery_id) else {
            return Err(AppError::BadRequest(
                "Missing required fields: name, price, bakery_id".into(),
            ));
        };
        let price = price
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite())
            .ok_or_else(|| AppError::BadRequest("Price must be a valid number".into()))?;
        if price < 0.0 {
            return Err(AppError::BadRequest("Price must not be negative".into()));
        }
        let bakery_id = bakery_id
            .trim()
            .parse::<i64>()
            .map_err(|_| AppError::BadRequest("Bakery ID must be a valid integer".into()))?;
        Ok(NewBakedGood { name, price, bakery_id })
    }
}

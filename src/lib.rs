//! Bakery API: bakeries and their baked goods over a small REST surface.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod repo;
pub mod response;
pub mod routes;
pub mod state;
pub mod store;

pub use config::AppConfig;
pub use error::{AppError, ConfigError};
pub use models::{BakedGood, Bakery, BakeryWithGoods, NewBakedGood};
pub use repo::{BakedGoodRepo, BakeryRepo};
pub use routes::api_routes;
pub use state::AppState;
pub use store::{connect, ensure_tables, in_memory};

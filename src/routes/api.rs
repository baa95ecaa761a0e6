//! The full route table. Each known path answers unsupported methods with 405, unless
//! its `:id` segment is not an integer; anything else falls through to 404. Bodies over
//! the limit are rejected by the form extractor with a JSON 413.

use crate::handlers::{baked_goods, bakeries, common};
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

pub fn api_routes(state: AppState, body_limit: usize) -> Router {
    Router::new()
        .route("/", get(common::home).fallback(common::method_not_allowed))
        .route("/bakeries", get(bakeries::list).fallback(common::method_not_allowed))
        .route(
            "/bakeries/:id",
            get(bakeries::read)
                .patch(bakeries::update)
                .fallback(common::method_not_allowed_for_id),
        )
        .route("/baked_goods", post(baked_goods::create).fallback(common::method_not_allowed))
        .route(
            "/baked_goods/by_price",
            get(baked_goods::by_price).fallback(common::method_not_allowed),
        )
        .route(
            "/baked_goods/most_expensive",
            get(baked_goods::most_expensive).fallback(common::method_not_allowed),
        )
        .route(
            "/baked_goods/:id",
            get(baked_goods::read)
                .delete(baked_goods::delete)
                .fallback(common::method_not_allowed_for_id),
        )
        .fallback(common::not_found)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

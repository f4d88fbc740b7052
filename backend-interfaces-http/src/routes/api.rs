use axum::routing::{get, post};
use axum::Router;

use backend_application::AppState;

use crate::handlers::{ingest_handlers, ops_handlers, query_handlers};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/match", post(ingest_handlers::ingest_match))
        .route("/api/match/:match_id", get(query_handlers::get_hero_kills))
        .route(
            "/api/match/:match_id/:hero_name/items",
            get(query_handlers::get_hero_items),
        )
        .route(
            "/api/match/:match_id/:hero_name/spells",
            get(query_handlers::get_hero_spells),
        )
        .route(
            "/api/match/:match_id/:hero_name/damage",
            get(query_handlers::get_hero_damage),
        )
        .route("/api/ops/health/live", get(ops_handlers::health_live))
        .route("/api/ops/health/ready", get(ops_handlers::health_ready))
        .route(
            "/api/ops/metrics/prometheus",
            get(ops_handlers::metrics_prometheus),
        )
        .with_state(state)
}

use axum::{
    Router,
    extract::{MatchedPath, Request},
    routing::{any, get},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{AppState, handlers};

/// Build the application router with CORS and request tracing applied.
pub fn build_router(app_state: AppState) -> Router {
    // Preflight OPTIONS requests are answered here with an empty 200
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let tracing_layer = TraceLayer::new_for_http().make_span_with(|req: &Request| {
        let method = req.method();
        let uri = req.uri();
        let matched_path = req
            .extensions()
            .get::<MatchedPath>()
            .map(|matched_path| matched_path.as_str());

        tracing::debug_span!("request", %method, %uri, matched_path)
    });

    Router::new()
        .route("/", any(handlers::root))
        .route(
            "/transactions",
            get(handlers::list_transactions)
                .post(handlers::create_transaction)
                .put(handlers::update_transaction)
                .delete(handlers::delete_transaction)
                .fallback(handlers::not_found),
        )
        .route(
            "/transactions/{id}",
            get(handlers::get_transaction).fallback(handlers::not_found),
        )
        .fallback(handlers::not_found)
        .layer(tracing_layer)
        .layer(cors)
        .with_state(app_state)
}

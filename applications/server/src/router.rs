/// HTTP route table
use crate::{api, middleware, state::AppState};
use axum::{
    middleware as axum_middleware,
    routing::{delete, get, patch, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

/// Build the full application router
pub fn create_router(app_state: AppState) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(api::health::health))
        .route("/register", post(api::auth::register))
        .route("/login", post(api::auth::login))
        .route("/auth", get(api::auth::whoami));

    // Protected routes (auth required)
    let protected_routes = Router::new()
        // Account
        .route("/inventory", get(api::account::inventory))
        .route("/purchased", get(api::account::purchased))
        .route("/increase-balance", post(api::account::increase_balance))
        // Stores
        .route("/stores", get(api::stores::list_stores))
        .route("/store/:id", get(api::stores::get_store))
        // Products
        .route("/product", put(api::products::add_product))
        .route("/product/:id", delete(api::products::delete_product))
        .route("/product/:id", patch(api::products::update_product))
        // Settlement
        .route("/purchase-product", post(api::purchases::purchase_product))
        .route("/transactions", get(api::purchases::transactions))
        .layer(axum_middleware::from_fn_with_state(
            Arc::clone(&app_state.auth_service),
            middleware::auth_middleware,
        ));

    Router::new()
        .route("/", get(api::health::root))
        .nest("/api", public_routes.merge(protected_routes))
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}

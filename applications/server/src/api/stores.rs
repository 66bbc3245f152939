/// Store directory routes
use crate::{
    api::ok_status,
    error::{OrInternal, Result},
    middleware::AuthenticatedUser,
    state::AppState,
};
use axum::{
    extract::{Path, State},
    Json,
};
use bazaar_core::types::{Store, StoreSummary, UserId};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct StoresResponse {
    pub status: u16,
    pub stores: Vec<StoreSummary>,
}

#[derive(Debug, Serialize)]
pub struct StoreResponse {
    pub status: u16,
    pub store: Option<Store>,
}

/// GET /api/stores - stores in the caller's region other than the caller's own
pub async fn list_stores(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<StoresResponse>> {
    let region = user.region()?;

    let stores = app_state
        .store
        .list_stores(region)
        .await
        .or_internal("COULDN'T GET STORES")?
        .into_iter()
        .filter(|store| &store.id != user.user_id())
        .collect();

    Ok(Json(StoresResponse {
        status: ok_status(),
        stores,
    }))
}

/// GET /api/store/:id
pub async fn get_store(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<Json<StoreResponse>> {
    let region = user.region()?;

    let store = app_state
        .store
        .get_store(region, &UserId::new(id))
        .await
        .or_internal("COULDN'T GET STORE")?;

    Ok(Json(StoreResponse {
        status: ok_status(),
        store,
    }))
}

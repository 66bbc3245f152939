/// Caller's own account: inventory, purchase history, balance
use crate::{
    api::{ok_status, MessageResponse},
    error::{OrInternal, Result, ServerError},
    extract::{FieldOrder, ValidatedJson},
    middleware::AuthenticatedUser,
    state::AppState,
};
use axum::{extract::State, Json};
use bazaar_core::types::{Product, ProductSnapshot, UserId};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Serialize)]
pub struct InventoryResponse {
    pub status: u16,
    pub user: OwnedInventory,
}

#[derive(Debug, Serialize)]
pub struct OwnedInventory {
    #[serde(rename = "_id")]
    pub id: UserId,
    pub inventory: Vec<Product>,
}

#[derive(Debug, Serialize)]
pub struct PurchasedResponse {
    pub status: u16,
    pub user: OwnedPurchases,
}

#[derive(Debug, Serialize)]
pub struct OwnedPurchases {
    #[serde(rename = "_id")]
    pub id: UserId,
    pub purchased: Vec<ProductSnapshot>,
}

/// Amount is not sign-checked
#[derive(Debug, Deserialize, Validate)]
pub struct IncreaseBalanceRequest {
    #[validate(required(message = "\"AMOUNT\" IS REQUIRED"))]
    pub amount: Option<f64>,
}

impl FieldOrder for IncreaseBalanceRequest {
    const FIELDS: &'static [&'static str] = &["amount"];
}

/// GET /api/inventory
pub async fn inventory(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<InventoryResponse>> {
    let region = user.region()?;

    let inventory = app_state
        .store
        .get_inventory(region, user.user_id())
        .await
        .or_internal("COULDN'T GET INVENTORY")?;

    Ok(Json(InventoryResponse {
        status: ok_status(),
        user: OwnedInventory {
            id: user.user_id().clone(),
            inventory,
        },
    }))
}

/// GET /api/purchased
pub async fn purchased(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<PurchasedResponse>> {
    let region = user.region()?;

    let purchased = app_state
        .store
        .get_purchased(region, user.user_id())
        .await
        .or_internal("COULDN'T GET PURCHASED PRODUCTS")?;

    Ok(Json(PurchasedResponse {
        status: ok_status(),
        user: OwnedPurchases {
            id: user.user_id().clone(),
            purchased,
        },
    }))
}

/// POST /api/increase-balance
pub async fn increase_balance(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    ValidatedJson(req): ValidatedJson<IncreaseBalanceRequest>,
) -> Result<Json<MessageResponse>> {
    let region = user.region()?;
    let amount = req
        .amount
        .ok_or_else(|| ServerError::Validation("\"AMOUNT\" IS REQUIRED".to_string()))?;

    let updated = app_state
        .store
        .increase_balance(region, user.user_id(), amount)
        .await
        .or_internal("COULDN'T INCREASE BALANCE")?;

    if !updated {
        tracing::warn!(user_id = %user.user_id(), "Balance top-up for a missing user");
        return Err(ServerError::Internal("COULDN'T INCREASE BALANCE".to_string()));
    }

    Ok(Json(MessageResponse::ok("BALANCE SUCCESSFULLY INCREASED")))
}

/// Product listing routes
use crate::{
    api::MessageResponse,
    error::{OrInternal, Result, ServerError},
    extract::{FieldOrder, ValidatedJson},
    middleware::AuthenticatedUser,
    state::AppState,
};
use axum::{
    extract::{Path, State},
    Json,
};
use bazaar_core::types::{NewProduct, ProductId, ProductPatch};
use serde::Deserialize;
use validator::Validate;

const PRICE_REQUIRED: &str = "\"PRICE\" IS REQUIRED";
const PRODUCT_NOT_FOUND: &str = "PRODUCT NOT FOUND";

#[derive(Debug, Deserialize, Validate)]
pub struct AddProductRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "\"NAME\" IS REQUIRED"))]
    pub name: String,

    #[validate(required(message = "\"PRICE\" IS REQUIRED"))]
    pub price: Option<f64>,

    #[validate(length(min = 1, message = "\"DESCRIPTION\" IS NOT ALLOWED TO BE EMPTY"))]
    pub description: Option<String>,
}

impl FieldOrder for AddProductRequest {
    const FIELDS: &'static [&'static str] = &["name", "price", "description"];
}

impl AddProductRequest {
    fn into_listing(self) -> Option<NewProduct> {
        Some(NewProduct {
            name: self.name,
            price: self.price?,
            description: self.description,
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, message = "\"NAME\" IS NOT ALLOWED TO BE EMPTY"))]
    pub name: Option<String>,

    pub price: Option<f64>,

    #[validate(length(min = 1, message = "\"DESCRIPTION\" IS NOT ALLOWED TO BE EMPTY"))]
    pub description: Option<String>,
}

impl FieldOrder for UpdateProductRequest {
    const FIELDS: &'static [&'static str] = &["name", "price", "description"];
}

impl From<UpdateProductRequest> for ProductPatch {
    fn from(req: UpdateProductRequest) -> Self {
        Self {
            name: req.name,
            price: req.price,
            description: req.description,
        }
    }
}

/// PUT /api/product
pub async fn add_product(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    ValidatedJson(req): ValidatedJson<AddProductRequest>,
) -> Result<Json<MessageResponse>> {
    let region = user.region()?;
    let listing = req
        .into_listing()
        .ok_or_else(|| ServerError::Validation(PRICE_REQUIRED.to_string()))?;

    let product = app_state
        .store
        .add_product(region, user.user_id(), listing)
        .await
        .or_internal("COULDN'T ADD PRODUCT")?;

    tracing::debug!(owner = %user.user_id(), product_id = %product.id, "Product listed");
    Ok(Json(MessageResponse::ok("PRODUCT SUCCESSFULLY ADDED")))
}

/// DELETE /api/product/:id
pub async fn delete_product(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let region = user.region()?;

    let removed = app_state
        .store
        .remove_product(region, user.user_id(), &ProductId::new(id))
        .await
        .or_internal("COULDN'T REMOVE PRODUCT")?;

    if !removed {
        return Err(ServerError::Declined(PRODUCT_NOT_FOUND.to_string()));
    }

    Ok(Json(MessageResponse::ok("PRODUCT SUCCESSFULLY REMOVED")))
}

/// PATCH /api/product/:id
///
/// Only the supplied fields change; a supplied zero price is applied.
pub async fn update_product(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateProductRequest>,
) -> Result<Json<MessageResponse>> {
    let region = user.region()?;

    let patch = ProductPatch::from(req);
    if patch.is_empty() {
        return Err(ServerError::Validation(
            "\"VALUE\" MUST CONTAIN AT LEAST ONE OF [NAME, PRICE, DESCRIPTION]".to_string(),
        ));
    }

    let updated = app_state
        .store
        .update_product(region, user.user_id(), &ProductId::new(id), patch)
        .await
        .or_internal("COULDN'T UPDATE PRODUCT")?;

    if updated.is_none() {
        return Err(ServerError::Declined(PRODUCT_NOT_FOUND.to_string()));
    }

    Ok(Json(MessageResponse::ok("PRODUCT SUCCESSFULLY UPDATED")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_request_requires_price() {
        let req: AddProductRequest = serde_json::from_str(r#"{"name": "Lamp"}"#).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn zero_price_is_a_supplied_field() {
        let req: UpdateProductRequest = serde_json::from_str(r#"{"price": 0}"#).unwrap();
        let patch = ProductPatch::from(req);

        assert_eq!(patch.price, Some(0.0));
        assert!(patch.name.is_none());
        assert!(!patch.is_empty());
    }
}

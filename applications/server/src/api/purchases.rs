/// Purchase and transaction history routes
use crate::{
    api::ok_status,
    error::{OrInternal, Result, ServerError},
    extract::{FieldOrder, ValidatedJson},
    middleware::AuthenticatedUser,
    state::AppState,
};
use axum::{extract::State, Json};
use bazaar_core::{
    types::{ProductId, Purchase, Transaction, TransactionId, UserId},
    MarketError,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// How many transactions the history endpoint returns
pub const RECENT_TRANSACTIONS: u32 = 5;

const SELF_PURCHASE: &str = "YOU CANNOT SELL PRODUCT TO YOURSELF";
const INSUFFICIENT_BALANCE: &str = "INSUFFICIENT BALANCE";

#[derive(Debug, Deserialize, Validate)]
pub struct PurchaseRequest {
    #[serde(rename = "sellerID", default)]
    #[validate(length(min = 1, message = "\"SELLERID\" IS REQUIRED"))]
    pub seller_id: String,

    #[serde(rename = "productID", default)]
    #[validate(length(min = 1, message = "\"PRODUCTID\" IS REQUIRED"))]
    pub product_id: String,
}

impl FieldOrder for PurchaseRequest {
    const FIELDS: &'static [&'static str] = &["seller_id", "product_id"];
}

#[derive(Debug, Serialize)]
pub struct PurchaseResponse {
    pub status: u16,
    pub message: String,
    #[serde(rename = "transactionID")]
    pub transaction_id: TransactionId,
}

#[derive(Debug, Serialize)]
pub struct TransactionsResponse {
    pub result: Vec<Transaction>,
}

/// POST /api/purchase-product
pub async fn purchase_product(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    ValidatedJson(req): ValidatedJson<PurchaseRequest>,
) -> Result<Json<PurchaseResponse>> {
    let purchase = Purchase {
        buyer_id: user.user_id().clone(),
        seller_id: UserId::new(req.seller_id),
        product_id: ProductId::new(req.product_id),
    };

    // Rejected before the region is even looked at
    if purchase.is_self_purchase() {
        return Err(ServerError::Declined(SELF_PURCHASE.to_string()));
    }

    let region = user.region()?;

    let transaction = match app_state.store.purchase(region, purchase).await {
        Ok(transaction) => transaction,
        Err(MarketError::InsufficientBalance { balance, price }) => {
            tracing::info!(
                buyer = %user.user_id(),
                balance,
                price,
                "Purchase declined for insufficient balance"
            );
            return Err(ServerError::Declined(INSUFFICIENT_BALANCE.to_string()));
        }
        Err(MarketError::SelfPurchase) => {
            return Err(ServerError::Declined(SELF_PURCHASE.to_string()))
        }
        Err(e) => return Err(e).or_internal("COULDN'T PURCHASE PRODUCT"),
    };

    tracing::info!(
        transaction_id = %transaction.id,
        buyer = %transaction.buyer.id,
        seller = %transaction.seller.id,
        amount = transaction.amount,
        "Purchase settled"
    );

    Ok(Json(PurchaseResponse {
        status: ok_status(),
        message: "PRODUCT SUCCESSFULLY PURCHASED".to_string(),
        transaction_id: transaction.id,
    }))
}

/// GET /api/transactions - newest first
pub async fn transactions(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<Json<TransactionsResponse>> {
    let result = app_state
        .store
        .recent_transactions(RECENT_TRANSACTIONS)
        .await
        .or_internal("COULDN'T GET TRANSACTIONS")?;

    Ok(Json(TransactionsResponse { result }))
}

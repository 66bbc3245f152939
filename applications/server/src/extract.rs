/// Request body extraction with schema validation
use crate::error::ServerError;
use axum::{
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

/// Request body whose violations are reported in a fixed field order
pub trait FieldOrder {
    /// Field names in declaration order
    const FIELDS: &'static [&'static str];
}

/// JSON body that has passed its `Validate` rules.
///
/// Malformed bodies and rule violations both reject with a 400 `Validation`
/// error carrying a single upper-cased message.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + FieldOrder,
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ServerError::Validation(rejection.body_text().to_uppercase()))?;

        value
            .validate()
            .map_err(|errors| ServerError::Validation(first_message(&errors, T::FIELDS)))?;

        Ok(Self(value))
    }
}

/// Report one violation: the first failing field in `order`, and within that
/// field a missing value before any shape rule. Fields absent from `order`
/// come last, by name.
fn first_message(errors: &ValidationErrors, order: &[&str]) -> String {
    let rank = |field: &str| order.iter().position(|f| *f == field).unwrap_or(order.len());

    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| rank(&*a.0).cmp(&rank(&*b.0)).then_with(|| a.0.cmp(&b.0)));

    fields
        .into_iter()
        .find_map(|(field, errs)| {
            errs.iter()
                .find(|err| err.code == "required")
                .or_else(|| errs.first())
                .map(|err| match &err.message {
                    Some(message) => message.to_string(),
                    None => format!("\"{}\" IS INVALID", field.to_uppercase()),
                })
        })
        .unwrap_or_else(|| "INVALID REQUEST BODY".to_string())
}

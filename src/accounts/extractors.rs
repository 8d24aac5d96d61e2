use axum::{
    async_trait,
    extract::{FromRequest, Json, Request},
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::accounts::error::{AccountError, FieldError};

/// JSON extractor that validates the body before the handler body runs.
///
/// Deserialization failures and schema violations both surface as
/// [`AccountError::Validation`], so every malformed request gets the same
/// 400 response with field-level detail.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AccountError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await.map_err(|e| {
            AccountError::Validation(vec![FieldError {
                field: "body".to_string(),
                message: e.body_text(),
            }])
        })?;

        data.validate().map_err(|errors| {
            let errors = errors
                .field_errors()
                .into_iter()
                .flat_map(|(field, errs)| {
                    errs.iter().map(move |err| FieldError {
                        field: field.to_string(),
                        message: err
                            .message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| err.code.to_string()),
                    })
                })
                .collect();
            AccountError::Validation(errors)
        })?;

        Ok(ValidatedJson(data))
    }
}

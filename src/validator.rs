use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::utils::errors::{AppError, FieldError};

/// Flattens [`ValidationErrors`] into per-field details. Every violated
/// field is reported in one pass. Struct-level (cross-field) rules are
/// only evaluated by `validator` once all per-field checks pass; they show
/// up under the synthetic `__all__` key and are reported against `body`.
fn collect_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut details: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, field_errors)| {
            let name = if field.as_ref() == "__all__" {
                "body"
            } else {
                field.as_ref()
            };
            field_errors.iter().map(move |error| {
                let message = error
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", name));
                FieldError::new(name, message)
            })
        })
        .collect();

    details.sort_by(|a, b| a.field.cmp(&b.field));
    details
}

/// JSON extractor that deserializes the body and runs schema validation
/// before the handler executes, rejecting with field-level detail.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                let error_msg = rejection.body_text();

                if error_msg.contains("missing field") {
                    let field = error_msg
                        .split("missing field `")
                        .nth(1)
                        .and_then(|s| s.split('`').next())
                        .unwrap_or("unknown");
                    return AppError::validation(vec![FieldError::new(
                        field,
                        format!("{} is required", field),
                    )]);
                }

                if error_msg.contains("invalid type") {
                    return AppError::validation(vec![FieldError::new(
                        "body",
                        "Invalid field type in request",
                    )]);
                }

                if matches!(rejection, JsonRejection::MissingJsonContentType(_)) {
                    return AppError::validation(vec![FieldError::new(
                        "body",
                        "Missing 'Content-Type: application/json' header",
                    )]);
                }

                AppError::validation(vec![FieldError::new("body", "Invalid request body")])
            })?;

        value
            .validate()
            .map_err(|errors| AppError::validation(collect_errors(&errors)))?;

        Ok(ValidatedJson(value))
    }
}

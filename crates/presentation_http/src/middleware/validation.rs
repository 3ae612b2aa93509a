//! Request validation
//!
//! Provides a `ValidatedForm` extractor that deserializes an urlencoded
//! body and validates it with the validator crate. Both failure modes
//! become a `PageError`, so malformed input reaches the terminal error
//! stage like every other failure.

use axum::extract::{FromRequest, Request};
use axum_extra::extract::Form;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::error::PageError;

/// Flatten validator errors into one readable line
fn format_errors(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors
                .iter()
                .map(|error| {
                    format!(
                        "{}: {}",
                        field,
                        error
                            .message
                            .as_ref()
                            .map_or_else(|| error.code.to_string(), ToString::to_string)
                    )
                })
                .collect::<Vec<_>>()
        })
        .collect();
    messages.sort();
    messages.join("; ")
}

/// A form extractor that also validates the request body
///
/// Use this instead of `Form<T>` in handlers that accept user input; the
/// handler body only ever sees data that passed its `Validate` rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedForm<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedForm<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = PageError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(value) = Form::<T>::from_request(req, state)
            .await
            .map_err(|e| PageError::bad_request(format!("Invalid form input: {e}")))?;

        value
            .validate()
            .map_err(|e| PageError::bad_request(format_errors(&e)))?;

        Ok(Self(value))
    }
}

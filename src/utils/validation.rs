//! Validación de payloads
//!
//! `ValidatedJson` deserializa el body y aplica las reglas declaradas con
//! `validator`; la primera violación encontrada se devuelve en la envoltura
//! como `{code: 400, text}`.

use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::utils::errors::AppError;

pub struct ValidatedJson<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::Validation(rejection.body_text()))?;

        value
            .validate()
            .map_err(|errors| AppError::Validation(first_violation(&errors)))?;

        Ok(ValidatedJson(value))
    }
}

/// Primer mensaje de violación, con el campo citado entre comillas:
/// `"width" must be a positive number`
pub fn first_violation(errors: &ValidationErrors) -> String {
    for (field, field_errors) in errors.field_errors() {
        if let Some(error) = field_errors.first() {
            let detail = error
                .message
                .as_ref()
                .map(|message| message.to_string())
                .unwrap_or_else(|| error.code.to_string());
            return format!("\"{}\" {}", field, detail);
        }
    }
    "invalid-payload".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Debug, serde::Deserialize, Validate)]
    struct Probe {
        #[validate(length(min = 1, message = "is required"))]
        reference: String,
        #[validate(range(min = 1, message = "must be a positive number"))]
        units: Option<i32>,
    }

    #[test]
    fn test_first_violation_quotes_the_field() {
        let probe = Probe {
            reference: String::new(),
            units: None,
        };
        let errors = probe.validate().unwrap_err();
        assert_eq!(first_violation(&errors), "\"reference\" is required");
    }

    #[test]
    fn test_optional_fields_validate_when_present() {
        let probe = Probe {
            reference: "REF123".to_string(),
            units: Some(0),
        };
        let errors = probe.validate().unwrap_err();
        assert_eq!(
            first_violation(&errors),
            "\"units\" must be a positive number"
        );
    }
}

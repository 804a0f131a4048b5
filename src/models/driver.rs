//! Modelo de Driver
//!
//! Un conductor está disponible para asignación si ningún envío suyo está
//! en espera o en tránsito.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Driver {
    pub id: i32,
    pub cifnif: String,
    pub name: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateDriverRequest {
    #[validate(
        length(min = 8, max = 20, message = "must have between 8 and 20 characters"),
        custom = "validate_cifnif"
    )]
    pub cifnif: String,

    #[validate(length(min = 2, max = 255, message = "must have between 2 and 255 characters"))]
    pub name: String,
}

fn validate_cifnif(value: &str) -> Result<(), ValidationError> {
    if value.chars().all(|c| c.is_ascii_alphanumeric()) {
        Ok(())
    } else {
        let mut error = ValidationError::new("alphanumeric");
        error.message = Some("may only contain letters and numbers".into());
        Err(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::validation::first_violation;

    #[test]
    fn test_cifnif_rejects_symbols() {
        let request = CreateDriverRequest {
            cifnif: "12345-678".to_string(),
            name: "Juan Pérez".to_string(),
        };
        let errors = request.validate().unwrap_err();
        assert_eq!(
            first_violation(&errors),
            "\"cifnif\" may only contain letters and numbers"
        );
    }

    #[test]
    fn test_valid_driver_passes() {
        let request = CreateDriverRequest {
            cifnif: "48591034X".to_string(),
            name: "Juan Pérez".to_string(),
        };
        assert!(request.validate().is_ok());
    }
}

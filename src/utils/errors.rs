//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema y su conversión
//! a la envoltura de respuesta de la API. Los fallos de negocio viajan con
//! HTTP 200 y el campo `code` de la envoltura como resultado autoritativo;
//! solo las rutas inexistentes producen estados HTTP distintos de 200.

use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

use crate::models::envelope::ApiResponse;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// Violación de regla de negocio, con detalle estructurado opcional
    #[error("Business rule violation: {text}")]
    Business {
        text: String,
        data: Option<serde_json::Value>,
    },

    #[error("JWT error: {0}")]
    Jwt(String),

    #[error("Hash error: {0}")]
    Hash(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn business(text: impl Into<String>) -> Self {
        AppError::Business {
            text: text.into(),
            data: None,
        }
    }

    pub fn business_with_data(text: impl Into<String>, data: serde_json::Value) -> Self {
        AppError::Business {
            text: text.into(),
            data: Some(data),
        }
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(err: bcrypt::BcryptError) -> Self {
        AppError::Hash(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        AppError::Jwt(err.to_string())
    }
}

/// Verificar si un error de sqlx es una violación de clave única (23505).
/// La restricción de unicidad en la base es el punto de verdad; los chequeos
/// previos en los controladores son solo un atajo de UX.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let response = match self {
            AppError::Database(err) => {
                error!("❌ error de base de datos: {err}");
                ApiResponse::text(500, "server-error")
            }
            AppError::Serialization(err) => {
                error!("❌ error de serialización: {err}");
                ApiResponse::text(500, "server-error")
            }
            AppError::Hash(err) => {
                error!("❌ error de hashing: {err}");
                ApiResponse::text(500, "server-error")
            }
            AppError::Internal(err) => {
                error!("❌ error interno: {err}");
                ApiResponse::text(500, "server-error")
            }
            AppError::Jwt(_) => ApiResponse::text(401, "Unauthorized"),
            AppError::Validation(text) => ApiResponse::text(400, &text),
            AppError::Unauthorized(text) => ApiResponse::text(401, &text),
            AppError::Forbidden(text) => ApiResponse::text(403, &text),
            AppError::NotFound(text) => ApiResponse::text(404, &text),
            AppError::Conflict(text) => ApiResponse::text(409, &text),
            AppError::RateLimitExceeded => ApiResponse::text(429, "too-many-requests"),
            AppError::Business { text, data } => match data {
                Some(data) => ApiResponse::data_text(400, data, &text),
                None => ApiResponse::text(400, &text),
            },
        };

        response.into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

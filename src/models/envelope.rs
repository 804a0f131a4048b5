//! Envoltura de respuesta de la API
//!
//! Todas las respuestas comparten la forma
//! `{code, data?, text?, message?, token?, pagination?}` y viajan con HTTP 200;
//! el campo `code` es el resultado autoritativo de la operación.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    #[serde(rename = "totalPages")]
    pub total_pages: i64,
}

impl Pagination {
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        let total_pages = if limit > 0 {
            (total + limit - 1) / limit
        } else {
            0
        };
        Self {
            page,
            limit,
            total,
            total_pages,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiResponse {
    pub code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

impl ApiResponse {
    fn empty(code: u16) -> Self {
        Self {
            code,
            data: None,
            text: None,
            message: None,
            token: None,
            pagination: None,
        }
    }

    pub fn text(code: u16, text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            ..Self::empty(code)
        }
    }

    pub fn message(code: u16, message: &str) -> Self {
        Self {
            message: Some(message.to_string()),
            ..Self::empty(code)
        }
    }

    pub fn data_text(code: u16, data: serde_json::Value, text: &str) -> Self {
        Self {
            data: Some(data),
            ..Self::text(code, text)
        }
    }

    pub fn data_message(code: u16, data: serde_json::Value, message: &str) -> Self {
        Self {
            data: Some(data),
            ..Self::message(code, message)
        }
    }

    pub fn with_token(mut self, token: String) -> Self {
        self.token = Some(token);
        self
    }

    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(Pagination::new(1, 20, 0).total_pages, 0);
        assert_eq!(Pagination::new(1, 20, 20).total_pages, 1);
        assert_eq!(Pagination::new(1, 20, 21).total_pages, 2);
        assert_eq!(Pagination::new(1, 10, 5).total_pages, 1);
    }

    #[test]
    fn test_envelope_skips_absent_fields() {
        let json = serde_json::to_value(ApiResponse::text(200, "send-created")).unwrap();
        assert_eq!(json["code"], 200);
        assert_eq!(json["text"], "send-created");
        assert!(json.get("data").is_none());
        assert!(json.get("pagination").is_none());
    }
}

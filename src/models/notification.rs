//! Requests de los endpoints de notificaciones

use serde::Deserialize;
use validator::Validate;

fn default_kind() -> String {
    "info".to_string()
}

#[derive(Debug, Deserialize, Validate)]
pub struct BroadcastRequest {
    pub message: Option<String>,
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct PrivateMessageRequest {
    pub email: Option<String>,
    pub message: Option<String>,
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SystemStatusRequest {
    pub status: Option<serde_json::Value>,
    pub details: Option<serde_json::Value>,
}

//! Eventos del canal realtime
//!
//! Los frames son JSON `{"event": <nombre>, "data": <payload>}` en ambas
//! direcciones. El cliente solo origina `authenticate`; el resto son
//! eventos servidor → cliente.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// cliente → servidor
pub const AUTHENTICATE: &str = "authenticate";

// servidor → cliente
pub const NEW_CONNECTION_MESSAGE: &str = "new-connection-message";
pub const AUTHENTICATED: &str = "authenticated";
pub const AUTHENTICATION_ERROR: &str = "authentication-error";
pub const NOTIFICATION: &str = "notification";
pub const PRIVATE_NOTIFICATION: &str = "private-notification";
pub const SYSTEM_STATUS_UPDATE: &str = "system-status-update";
pub const USER_REGISTERED: &str = "user-registered";
pub const NEW_SEND_NOTIFICATION: &str = "new-send-notification";
pub const SEND_UPDATED_NOTIFICATION: &str = "send-updated-notification";

/// Frame saliente
#[derive(Debug, Clone, Serialize)]
pub struct SocketEvent {
    pub event: String,
    pub data: Value,
}

impl SocketEvent {
    pub fn new(event: &str, data: Value) -> Self {
        Self {
            event: event.to_string(),
            data,
        }
    }
}

/// Frame entrante
#[derive(Debug, Deserialize)]
pub struct ClientEvent {
    pub event: String,
    #[serde(default)]
    pub data: Value,
}

/// Payload del evento `authenticate`
#[derive(Debug, Deserialize)]
pub struct AuthenticatePayload {
    #[serde(default)]
    pub token: String,
}

//! Endpoints de administración del canal realtime
//!
//! Broadcast, mensajes privados y consultas sobre el registro de conexiones.
//! Que el destinatario no esté conectado no es un error: se informa con
//! `delivered: false` en el payload.

use serde_json::json;

use crate::models::envelope::ApiResponse;
use crate::models::notification::{BroadcastRequest, PrivateMessageRequest, SystemStatusRequest};
use crate::services::NotificationService;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub struct NotificationController {
    notifications: NotificationService,
}

impl NotificationController {
    pub fn new(state: &AppState) -> Self {
        Self {
            notifications: state.notifications.clone(),
        }
    }

    pub async fn broadcast(&self, request: BroadcastRequest) -> Result<ApiResponse, AppError> {
        let Some(message) = request.message.filter(|message| !message.is_empty()) else {
            return Err(AppError::business("message-required"));
        };

        self.notifications
            .broadcast_notification(&message, &request.kind)
            .await;

        Ok(ApiResponse::data_text(
            200,
            json!({ "message": message, "type": request.kind }),
            "notification-sent",
        ))
    }

    pub async fn private_message(
        &self,
        request: PrivateMessageRequest,
    ) -> Result<ApiResponse, AppError> {
        let (Some(email), Some(message)) = (
            request.email.filter(|email| !email.is_empty()),
            request.message.filter(|message| !message.is_empty()),
        ) else {
            return Err(AppError::business("email-and-message-required"));
        };

        let delivered = self
            .notifications
            .private_notification(&email, &message, &request.kind)
            .await;

        let text = if delivered {
            "private-message-sent"
        } else {
            "user-not-connected"
        };

        Ok(ApiResponse::data_text(
            200,
            json!({ "email": email, "message": message, "delivered": delivered }),
            text,
        ))
    }

    pub async fn system_status(&self, request: SystemStatusRequest) -> Result<ApiResponse, AppError> {
        self.notifications
            .system_status(request.status.clone(), request.details.clone())
            .await;

        Ok(ApiResponse::data_text(
            200,
            json!({ "status": request.status, "details": request.details }),
            "system-status-broadcasted",
        ))
    }

    pub async fn connected_users(&self) -> Result<ApiResponse, AppError> {
        let users = self.notifications.connected_users().await;

        Ok(ApiResponse::data_text(
            200,
            json!({ "count": users.len(), "users": users }),
            "connected-users-retrieved",
        ))
    }

    pub async fn user_status(&self, email: &str) -> Result<ApiResponse, AppError> {
        let connected = self.notifications.is_user_connected(email).await;

        Ok(ApiResponse::data_text(
            200,
            json!({ "email": email, "connected": connected }),
            "user-status-retrieved",
        ))
    }
}

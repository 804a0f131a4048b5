//! Despachador de notificaciones
//!
//! Capa fina sobre el registro de conexiones: todo productor de eventos de
//! negocio (ciclo de vida de envíos, registro de usuarios, endpoints de
//! administración) pasa por aquí y nunca toca el mapa interno. La entrega es
//! best-effort; que el destinatario no esté conectado es un resultado normal.

use serde_json::{json, Value};

use crate::models::send::Send;
use crate::socket::events;
use crate::socket::manager::SocketManager;
use crate::utils::time::now_rfc3339;

#[derive(Clone)]
pub struct NotificationService {
    socket: SocketManager,
}

impl NotificationService {
    pub fn new(socket: SocketManager) -> Self {
        Self { socket }
    }

    /// Notificación genérica a todos los clientes conectados
    pub async fn broadcast_notification(&self, message: &str, kind: &str) {
        self.socket
            .emit_to_all(
                events::NOTIFICATION,
                json!({
                    "message": message,
                    "type": kind,
                    "timestamp": now_rfc3339(),
                    "from": "system",
                }),
            )
            .await;
    }

    /// Mensaje privado a un usuario identificado por email
    pub async fn private_notification(&self, email: &str, message: &str, kind: &str) -> bool {
        self.socket
            .emit_to_user(
                email,
                events::PRIVATE_NOTIFICATION,
                json!({
                    "message": message,
                    "type": kind,
                    "timestamp": now_rfc3339(),
                    "from": "system",
                }),
            )
            .await
    }

    /// Cambio de estado global del sistema
    pub async fn system_status(&self, status: Option<Value>, details: Option<Value>) {
        self.socket
            .emit_to_all(
                events::SYSTEM_STATUS_UPDATE,
                json!({
                    "message": "system-status-changed",
                    "status": status,
                    "details": details,
                    "timestamp": now_rfc3339(),
                }),
            )
            .await;
    }

    /// Alta de usuario, anunciada a todos los clientes
    pub async fn user_registered(&self, name: &str, email: &str) {
        self.socket
            .emit_to_all(
                events::USER_REGISTERED,
                json!({
                    "message": "new-user-registered",
                    "userEmail": email,
                    "userName": name,
                    "timestamp": now_rfc3339(),
                }),
            )
            .await;
    }

    /// Envío creado, notificado a su propietario
    pub async fn send_created(&self, email: &str, send: &Send) {
        self.socket
            .emit_to_user(
                email,
                events::NEW_SEND_NOTIFICATION,
                json!({
                    "message": "new-send-created",
                    "uniqueId": send.unique_id,
                    "reference": send.reference,
                    "state": send.state,
                    "timestamp": now_rfc3339(),
                }),
            )
            .await;
    }

    /// Envío actualizado, notificado a su propietario con el actor del cambio
    pub async fn send_updated(&self, email: &str, send: &Send, actor: &str) {
        self.socket
            .emit_to_user(
                email,
                events::SEND_UPDATED_NOTIFICATION,
                json!({
                    "message": "send-updated",
                    "uniqueId": send.unique_id,
                    "state": send.state,
                    "updatedBy": actor,
                    "timestamp": now_rfc3339(),
                }),
            )
            .await;
    }

    pub async fn connected_users(&self) -> Vec<String> {
        self.socket.connected_users().await
    }

    pub async fn is_user_connected(&self, email: &str) -> bool {
        self.socket.is_user_connected(email).await
    }
}

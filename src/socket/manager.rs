//! Registro de conexiones realtime
//!
//! Mantiene en memoria el mapa email → conexión viva y los primitivos de
//! envío dirigido y broadcast. Es un componente inyectado: se construye una
//! vez en el estado de la aplicación y se clona hacia el transporte y hacia
//! el despachador de notificaciones. Todo el envío es best-effort: un `true`
//! solo significa que había una conexión registrada al momento de la
//! consulta, nunca que el cliente remoto procesó el mensaje.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::json;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::user::PublicUser;
use crate::socket::events::{self, SocketEvent};
use crate::utils::jwt::{decode_token, TokenConfig};
use crate::utils::time::now_rfc3339;

pub type ConnectionId = Uuid;

#[derive(Clone)]
pub struct SocketManager {
    /// Toda conexión viva, autenticada o no
    sessions: Arc<RwLock<HashMap<ConnectionId, UnboundedSender<SocketEvent>>>>,
    /// email → conexión; a lo sumo una entrada por email, la última gana
    users: Arc<RwLock<HashMap<String, ConnectionId>>>,
    tokens: TokenConfig,
}

impl SocketManager {
    pub fn new(tokens: TokenConfig) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            users: Arc::new(RwLock::new(HashMap::new())),
            tokens,
        }
    }

    /// Registrar una conexión pendiente y confirmarle su handle
    pub async fn register(&self, sender: UnboundedSender<SocketEvent>) -> ConnectionId {
        let id = Uuid::new_v4();
        self.sessions.write().await.insert(id, sender);
        log::info!("🔌 client-connected: {id}");

        self.send_to(
            id,
            SocketEvent::new(
                events::NEW_CONNECTION_MESSAGE,
                json!({
                    "message": "client-connected",
                    "socketId": id,
                    "timestamp": now_rfc3339(),
                }),
            ),
        )
        .await;

        id
    }

    /// Asociar la conexión con el email embebido en el token. Un token
    /// inválido deja el registro intacto y notifica el error a la conexión.
    pub async fn authenticate(
        &self,
        id: ConnectionId,
        token: &str,
        origin: &str,
    ) -> Option<String> {
        match decode_token::<PublicUser>(token, &self.tokens, origin) {
            Ok(claims) => {
                let email = claims.data.email;
                self.users.write().await.insert(email.clone(), id);
                log::info!("🔐 user authenticated: {email} -> {id}");

                self.send_to(
                    id,
                    SocketEvent::new(
                        events::AUTHENTICATED,
                        json!({
                            "message": "authentication-success",
                            "email": email,
                            "timestamp": now_rfc3339(),
                        }),
                    ),
                )
                .await;

                Some(email)
            }
            Err(_) => {
                self.send_to(
                    id,
                    SocketEvent::new(
                        events::AUTHENTICATION_ERROR,
                        json!({
                            "message": "invalid-token",
                            "timestamp": now_rfc3339(),
                        }),
                    ),
                )
                .await;

                None
            }
        }
    }

    /// Eliminar la conexión y cualquier email ligado a ella
    pub async fn unregister(&self, id: ConnectionId) {
        self.sessions.write().await.remove(&id);

        let mut users = self.users.write().await;
        if let Some(email) = users
            .iter()
            .find(|(_, bound)| **bound == id)
            .map(|(email, _)| email.clone())
        {
            users.remove(&email);
            log::info!("🔓 user disconnected: {email}");
        }
    }

    /// Broadcast best-effort a toda conexión viva
    pub async fn emit_to_all(&self, event: &str, data: serde_json::Value) {
        let sessions = self.sessions.read().await;
        for sender in sessions.values() {
            let _ = sender.send(SocketEvent::new(event, data.clone()));
        }
    }

    /// Envío dirigido por email. `true` significa que había una conexión
    /// registrada para ese email al momento de la consulta.
    pub async fn emit_to_user(&self, email: &str, event: &str, data: serde_json::Value) -> bool {
        let target = { self.users.read().await.get(email).copied() };
        let Some(id) = target else {
            log::debug!("❌ user not connected: {email}");
            return false;
        };
        self.send_to(id, SocketEvent::new(event, data)).await
    }

    /// Snapshot de los emails actualmente registrados
    pub async fn connected_users(&self) -> Vec<String> {
        self.users.read().await.keys().cloned().collect()
    }

    pub async fn is_user_connected(&self, email: &str) -> bool {
        self.users.read().await.contains_key(email)
    }

    async fn send_to(&self, id: ConnectionId, event: SocketEvent) -> bool {
        let sessions = self.sessions.read().await;
        match sessions.get(&id) {
            Some(sender) => sender.send(event).is_ok(),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::jwt::create_token;
    use tokio::sync::mpsc::{self, UnboundedReceiver};

    const ORIGIN: &str = "127.0.0.1";

    fn test_manager() -> SocketManager {
        SocketManager::new(TokenConfig {
            secret: "secreto-de-pruebas".to_string(),
            app_url: "http://localhost:3000".to_string(),
        })
    }

    fn token_for(manager: &SocketManager, email: &str) -> String {
        let user = PublicUser {
            id: 1,
            name: "Test User".to_string(),
            email: email.to_string(),
            rol_id: 2,
        };
        create_token(&user, &manager.tokens, ORIGIN).unwrap()
    }

    async fn connect(manager: &SocketManager) -> (ConnectionId, UnboundedReceiver<SocketEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = manager.register(tx).await;
        (id, rx)
    }

    #[tokio::test]
    async fn test_new_connection_gets_acknowledgement() {
        let manager = test_manager();
        let (id, mut rx) = connect(&manager).await;

        let event = rx.recv().await.unwrap();
        assert_eq!(event.event, events::NEW_CONNECTION_MESSAGE);
        assert_eq!(event.data["message"], "client-connected");
        assert_eq!(event.data["socketId"], id.to_string());
    }

    #[tokio::test]
    async fn test_authenticate_registers_the_email() {
        let manager = test_manager();
        let (id, mut rx) = connect(&manager).await;
        rx.recv().await.unwrap();

        let token = token_for(&manager, "ana@mail.com");
        let email = manager.authenticate(id, &token, ORIGIN).await;

        assert_eq!(email.as_deref(), Some("ana@mail.com"));
        assert!(manager.is_user_connected("ana@mail.com").await);
        assert_eq!(manager.connected_users().await, vec!["ana@mail.com"]);

        let event = rx.recv().await.unwrap();
        assert_eq!(event.event, events::AUTHENTICATED);
        assert_eq!(event.data["message"], "authentication-success");
        assert_eq!(event.data["email"], "ana@mail.com");
    }

    #[tokio::test]
    async fn test_invalid_token_leaves_registry_unchanged() {
        let manager = test_manager();
        let (id, mut rx) = connect(&manager).await;
        rx.recv().await.unwrap();

        let email = manager.authenticate(id, "no-es-un-token", ORIGIN).await;

        assert_eq!(email, None);
        assert!(manager.connected_users().await.is_empty());

        let event = rx.recv().await.unwrap();
        assert_eq!(event.event, events::AUTHENTICATION_ERROR);
        assert_eq!(event.data["message"], "invalid-token");
    }

    #[tokio::test]
    async fn test_token_bound_to_other_origin_is_rejected() {
        let manager = test_manager();
        let (id, mut rx) = connect(&manager).await;
        rx.recv().await.unwrap();

        let token = token_for(&manager, "ana@mail.com");
        let email = manager.authenticate(id, &token, "10.0.0.9").await;

        assert_eq!(email, None);
        assert!(!manager.is_user_connected("ana@mail.com").await);
    }

    #[tokio::test]
    async fn test_emit_to_user_reaches_only_the_target() {
        let manager = test_manager();
        let (ana_id, mut ana_rx) = connect(&manager).await;
        let (luis_id, mut luis_rx) = connect(&manager).await;
        ana_rx.recv().await.unwrap();
        luis_rx.recv().await.unwrap();

        let ana_token = token_for(&manager, "ana@mail.com");
        let luis_token = token_for(&manager, "luis@mail.com");
        manager.authenticate(ana_id, &ana_token, ORIGIN).await;
        manager.authenticate(luis_id, &luis_token, ORIGIN).await;
        ana_rx.recv().await.unwrap();
        luis_rx.recv().await.unwrap();

        let delivered = manager
            .emit_to_user("ana@mail.com", events::PRIVATE_NOTIFICATION, json!({"x": 1}))
            .await;

        assert!(delivered);
        let event = ana_rx.recv().await.unwrap();
        assert_eq!(event.event, events::PRIVATE_NOTIFICATION);
        assert!(luis_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_emit_to_unknown_user_returns_false() {
        let manager = test_manager();
        let delivered = manager
            .emit_to_user("nadie@mail.com", events::NOTIFICATION, json!({}))
            .await;
        assert!(!delivered);
    }

    #[tokio::test]
    async fn test_last_connection_for_an_email_wins() {
        let manager = test_manager();
        let (first_id, mut first_rx) = connect(&manager).await;
        let (second_id, mut second_rx) = connect(&manager).await;
        first_rx.recv().await.unwrap();
        second_rx.recv().await.unwrap();

        let token = token_for(&manager, "ana@mail.com");
        manager.authenticate(first_id, &token, ORIGIN).await;
        manager.authenticate(second_id, &token, ORIGIN).await;
        first_rx.recv().await.unwrap();
        second_rx.recv().await.unwrap();

        manager
            .emit_to_user("ana@mail.com", events::NOTIFICATION, json!({"n": 1}))
            .await;

        assert!(second_rx.recv().await.is_some());
        assert!(first_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_disconnect_removes_only_that_user() {
        let manager = test_manager();
        let (ana_id, mut ana_rx) = connect(&manager).await;
        let (luis_id, mut luis_rx) = connect(&manager).await;
        ana_rx.recv().await.unwrap();
        luis_rx.recv().await.unwrap();

        let ana_token = token_for(&manager, "ana@mail.com");
        let luis_token = token_for(&manager, "luis@mail.com");
        manager.authenticate(ana_id, &ana_token, ORIGIN).await;
        manager.authenticate(luis_id, &luis_token, ORIGIN).await;

        manager.unregister(ana_id).await;

        assert!(!manager.is_user_connected("ana@mail.com").await);
        assert!(manager.is_user_connected("luis@mail.com").await);
        assert!(
            !manager
                .emit_to_user("ana@mail.com", events::NOTIFICATION, json!({}))
                .await
        );
    }

    #[tokio::test]
    async fn test_broadcast_reaches_unauthenticated_connections() {
        let manager = test_manager();
        let (_id, mut rx) = connect(&manager).await;
        rx.recv().await.unwrap();

        manager
            .emit_to_all(events::SYSTEM_STATUS_UPDATE, json!({"status": "online"}))
            .await;

        let event = rx.recv().await.unwrap();
        assert_eq!(event.event, events::SYSTEM_STATUS_UPDATE);
        assert_eq!(event.data["status"], "online");
    }
}

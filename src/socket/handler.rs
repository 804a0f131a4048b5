//! Transporte websocket del canal realtime
//!
//! Cada conexión entra por `GET /ws`, recibe su acuse de conexión y puede
//! autenticarse enviando `{"event": "authenticate", "data": {"token"}}`.
//! Una tarea reenvía la cola de eventos salientes hacia el sink; el loop de
//! entrada solo atiende el handshake de autenticación y el cierre.

use std::net::SocketAddr;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{ConnectInfo, State};
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;

use crate::socket::events::{self, AuthenticatePayload, ClientEvent, SocketEvent};
use crate::socket::manager::SocketManager;
use crate::state::AppState;

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    State(state): State<AppState>,
) -> Response {
    ws.on_upgrade(move |socket| handle_connection(socket, addr, state.socket))
}

async fn handle_connection(socket: WebSocket, addr: SocketAddr, manager: SocketManager) {
    let (mut sink, mut stream) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<SocketEvent>();

    let id = manager.register(tx).await;

    let mut forward = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let Ok(text) = serde_json::to_string(&event) else {
                continue;
            };
            if sink.send(Message::Text(text)).await.is_err() {
                break;
            }
        }
    });

    // La audiencia del token se valida contra la IP del cliente, igual que
    // en el middleware HTTP
    let origin = addr.ip().to_string();

    loop {
        tokio::select! {
            incoming = stream.next() => match incoming {
                Some(Ok(Message::Text(text))) => {
                    let Ok(frame) = serde_json::from_str::<ClientEvent>(&text) else {
                        continue;
                    };
                    if frame.event == events::AUTHENTICATE {
                        let payload = serde_json::from_value::<AuthenticatePayload>(frame.data)
                            .unwrap_or(AuthenticatePayload {
                                token: String::new(),
                            });
                        manager.authenticate(id, &payload.token, &origin).await;
                    }
                }
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(_)) => break,
            },
            _ = &mut forward => break,
        }
    }

    manager.unregister(id).await;
    forward.abort();
}

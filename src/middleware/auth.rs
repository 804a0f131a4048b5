//! Middleware de autenticación JWT
//!
//! Extrae el bearer token, lo verifica contra la IP del llamante como
//! audiencia y cuelga la identidad decodificada en las extensions de la
//! request. La identidad viaja en el payload del token; no se vuelve a
//! consultar la base por request.

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;

use crate::models::user::PublicUser;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::{decode_token, TokenConfig};

/// Usuario autenticado que se inyecta en las requests
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub rol_id: i32,
}

pub async fn get_user_data(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::Unauthorized("Unauthorized".to_string()))?;

    let config = TokenConfig::from(&state.config);
    let claims = decode_token::<PublicUser>(token, &config, &addr.ip().to_string())
        .map_err(|_| AppError::Unauthorized("Unauthorized".to_string()))?;

    let user = claims.data;
    request.extensions_mut().insert(AuthenticatedUser {
        id: user.id,
        name: user.name,
        email: user.email,
        rol_id: user.rol_id,
    });

    Ok(next.run(request).await)
}

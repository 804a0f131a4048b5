//! Ensamblado del router de la API
//!
//! Cada recurso aporta su propio sub-router; las capas transversales
//! (trace, CORS, rate limit general) se aplican al conjunto.

pub mod driver_routes;
pub mod general_routes;
pub mod home_routes;
pub mod login_routes;
pub mod notification_routes;
pub mod send_routes;
pub mod user_routes;

use axum::middleware::from_fn_with_state;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::middleware::cors::cors_middleware;
use crate::middleware::rate_limit::{rate_limit_middleware, RateLimitState};
use crate::socket::handler::ws_handler;
use crate::state::AppState;

pub fn create_api_router(state: AppState) -> Router {
    let general_limiter = RateLimitState::general(&state.config);

    Router::new()
        .nest("/api/login", login_routes::create_login_router(state.clone()))
        .nest("/api/sends", send_routes::create_send_router(state.clone()))
        .nest(
            "/api/drivers",
            driver_routes::create_driver_router(state.clone()),
        )
        .nest("/api/users", user_routes::create_user_router(state.clone()))
        .nest(
            "/api/general",
            general_routes::create_general_router(state.clone()),
        )
        .nest("/api/home", home_routes::create_home_router(state.clone()))
        .nest(
            "/api/notifications",
            notification_routes::create_notification_router(),
        )
        // axum no entrega el path con barra final (`/api/login/`) al router
        // anidado, así que la sonda Ready de cada controlador se expone
        // también en su forma con barra final, reutilizando el mismo handler.
        .route("/api/login/", get(login_routes::ready))
        .route("/api/sends/", get(send_routes::ready))
        .route("/api/drivers/", get(driver_routes::ready))
        .route("/api/users/", get(user_routes::ready))
        .route("/api/general/", get(general_routes::ready))
        .route("/api/home/", get(home_routes::ready))
        .route("/ws", get(ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors_middleware(&state.config))
        .layer(from_fn_with_state(general_limiter, rate_limit_middleware))
        .with_state(state)
}

use std::net::SocketAddr;

use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info};

use send_tracking::config::EnvironmentConfig;
use send_tracking::database::connection::{create_pool, mask_database_url};
use send_tracking::routes;
use send_tracking::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("📦 Send Tracking API");
    info!("====================");

    let config = EnvironmentConfig::from_env();

    // Inicializar base de datos
    info!("🗄️  Conectando a {}", mask_database_url(&config.database_url));
    let pool = match create_pool(&config.database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    let addr: SocketAddr = config.server_addr().parse()?;
    let app = routes::create_api_router(AppState::new(pool, config));

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   POST /api/login/login - Iniciar sesión");
    info!("   POST /api/login/register - Registrar usuario");
    info!("   POST /api/sends/create - Crear envío");
    info!("   PUT  /api/sends/update/:id - Actualizar envío");
    info!("   POST /api/sends/getSendsFiltered - Listar envíos filtrados");
    info!("   GET  /api/drivers/drivers - Listar conductores");
    info!("   POST /api/drivers/create - Crear conductor");
    info!("   GET  /api/users/getAllUsers - Listar usuarios");
    info!("   GET  /api/general/routes - Rutas con vehículo");
    info!("   GET  /api/home/tracking/:unique_id - Tracking público");
    info!("   GET  /api/home/tracking - Listado autenticado");
    info!("   GET  /api/home/tracking-auth/:unique_id - Tracking con autoría");
    info!("   POST /api/notifications/broadcast - Notificación global");
    info!("   POST /api/notifications/private - Notificación privada");
    info!("   GET  /api/notifications/connected-users - Usuarios conectados");
    info!("   GET  /ws - Canal realtime");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}

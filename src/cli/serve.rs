use std::sync::Arc;

use poem::Server;
use poem::listener::TcpListener;

use crate::app_data::AppData;
use crate::config::{BootstrapSettings, init_database, migrate_database};
use crate::server::build_app;

/// Connect, migrate, assemble AppData and serve until shutdown
pub async fn run_server(settings: BootstrapSettings) -> Result<(), Box<dyn std::error::Error>> {
    let db = init_database(&settings).await?;
    migrate_database(&db).await?;

    let app_data = Arc::new(AppData::init(db, settings).await?);
    let address = app_data.settings.server_address();

    let app = build_app(app_data);

    tracing::info!("Server listening on http://{}", address);
    tracing::info!("Swagger UI available at http://{}/swagger", address);

    Server::new(TcpListener::bind(address)).run(app).await?;

    Ok(())
}

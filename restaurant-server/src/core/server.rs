//! Server Implementation

use tokio::net::TcpListener;

use crate::core::{Config, Result, ServerState};
use crate::routes::build_app;

/// HTTP Server
pub struct Server {
    config: Config,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Bind and serve until ctrl-c
    pub async fn run(self) -> Result<()> {
        if self.config.is_production() && self.config.cors_origins.is_any() {
            tracing::warn!(
                "CORS allows every origin in production; set CORS_ALLOWED_ORIGINS to restrict it"
            );
        }

        let addr = self.config.bind_addr();
        let state = ServerState::new(self.config);
        let app = build_app(&state).with_state(state.clone());

        let listener = TcpListener::bind(&addr).await?;
        tracing::info!(
            addr = %addr,
            database = %state.config.database_path,
            environment = %state.config.environment,
            "Restaurant server listening"
        );

        let shutdown = async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down...");
        };

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        Ok(())
    }
}

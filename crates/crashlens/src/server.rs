use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tower_http::cors::{Any, CorsLayer};

use crate::query::QueryEngine;

pub mod data;
pub mod error;
pub mod filters;
pub mod openapi;

pub struct Server {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
}

impl Server {
    /// Bind `bind` and serve the API in a background task until shutdown.
    pub async fn new(bind: SocketAddr, engine: QueryEngine) -> Result<Self, String> {
        let state = Arc::new(ServerState { engine });
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        let app = router(state).layer(cors);
        let listener = TcpListener::bind(bind)
            .await
            .map_err(|error| error.to_string())?;
        let addr = listener
            .local_addr()
            .map_err(|error| error.to_string())?;
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            let _ = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await;
        });

        Ok(Server {
            addr,
            shutdown: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn shutdown(&mut self) -> Result<(), String> {
        if let Some(sender) = self.shutdown.take() {
            sender
                .send(())
                .map_err(|_| "failed to send server shutdown signal".to_string())
        } else {
            Ok(())
        }
    }
}

impl Drop for Server {
    fn drop(&mut self) {
        let _ = self.shutdown();
    }
}

fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/filters", get(filters::filter_options))
        .route("/api/data", post(data::query_data))
        .route("/api/openapi.json", get(openapi::openapi_json))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

pub(crate) struct ServerState {
    pub(crate) engine: QueryEngine,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Dataset, DatasetHandle};

    fn engine() -> QueryEngine {
        QueryEngine::new(DatasetHandle::new(Dataset::from_records(Vec::new())))
    }

    #[tokio::test]
    async fn start_binds_requested_interface() {
        let bind = SocketAddr::from(([127, 0, 0, 1], 0));
        let mut server = Server::new(bind, engine()).await.expect("start");
        assert_ne!(server.addr().port(), 0);
        server.shutdown().expect("shutdown");
    }

    #[tokio::test]
    async fn shutdown_is_idempotent() {
        let bind = SocketAddr::from(([127, 0, 0, 1], 0));
        let mut server = Server::new(bind, engine()).await.expect("start");
        server.shutdown().expect("first shutdown");
        server.shutdown().expect("second shutdown");
    }
}

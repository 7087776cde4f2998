//! Axum HTTP server for the JSON-RPC endpoint.
//!
//! Bind-then-report: the listener is bound first and the real address is
//! logged afterwards, so `port = 0` reports the port actually assigned.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

use anyhow::Context;
use axum::{
    Json, Router,
    extract::State,
    response::{IntoResponse, Response},
    routing::post,
};
use bytes::Bytes;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use crate::translator::Translator;

/// Default listening port.
pub const DEFAULT_PORT: u16 = 8000;

/// Listener configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Interface to bind to.
    pub host: IpAddr,
    /// Port to bind to (0 for auto-assign).
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Build the router: a single `POST /` route.
pub fn create_router(translator: Arc<Translator>) -> Router {
    Router::new()
        .route("/", post(rpc))
        .layer(TraceLayer::new_for_http())
        .with_state(translator)
}

/// Bind according to `config` and serve until `cancel` fires.
pub async fn start(
    config: &ServerConfig,
    translator: Arc<Translator>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;
    serve(listener, translator, cancel).await
}

/// Run the server on a pre-bound listener until the cancellation token is
/// triggered.
///
/// Returns `Ok(())` on clean shutdown, or an error if the server fails.
pub async fn serve(
    listener: TcpListener,
    translator: Arc<Translator>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let addr = listener.local_addr()?;
    info!(
        default_model = %translator.config().default_model,
        "JSON-RPC server listening on http://{addr}/"
    );

    axum::serve(listener, create_router(translator))
        .with_graceful_shutdown(cancel.cancelled_owned())
        .await?;

    info!("JSON-RPC server shut down");
    Ok(())
}

/// `POST /` handler.
async fn rpc(State(translator): State<Arc<Translator>>, body: Bytes) -> Response {
    debug!(bytes = body.len(), "POST /");

    match translator.translate(&body).await {
        Ok(response) => Json(response).into_response(),
        Err(e) => e.into_response(),
    }
}

//! HTTP server implementation.
//!
//! Uses hyper http1 with TokioIo for async handling. Each connection is
//! served on its own task; each request is an independent, stateless unit of
//! work against the shared pool.

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::convert::Infallible;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, info};

use crate::config::Args;
use crate::database::DbPool;
use crate::routes;

/// Shared application state: the one config object and the one pool.
pub struct AppState {
    pub args: Args,
    pub pool: DbPool,
}

pub async fn run(state: Arc<AppState>) -> anyhow::Result<()> {
    let listener = TcpListener::bind(state.args.listen).await?;
    info!(addr = %state.args.listen, "ecoverse-api listening");

    loop {
        let (stream, remote) = listener.accept().await?;
        let io = TokioIo::new(stream);
        let state = Arc::clone(&state);

        tokio::spawn(async move {
            let service = service_fn(move |req| {
                let state = Arc::clone(&state);
                async move { Ok::<_, Infallible>(routes::handle_request(state, req).await) }
            });
            if let Err(e) = http1::Builder::new().serve_connection(io, service).await {
                debug!(%remote, error = %e, "connection closed with error");
            }
        });
    }
}

//! # Server Bootstrap
//!
//! Wires configuration, the file-backed status store, the web state and the router into
//! a bound server, and manages its lifecycle:
//!
//! - [`TelemetryServer::bind`] binds the listener (port `0` picks a free port)
//! - [`TelemetryServer::run_until`] serves until a shutdown future resolves
//! - [`TelemetryServer::spawn`] serves in the background and returns a handle

use axum::Router;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::config::TelemetryConfig;
use crate::error::{Result, TelemetryError};
use crate::store::{FileStatusStore, StatusStore};
use crate::web::{create_app, TelemetryWebState};

/// A bound, not yet running, telemetry server
pub struct TelemetryServer {
    listener: TcpListener,
    app: Router,
    local_addr: SocketAddr,
}

impl TelemetryServer {
    /// Bind using the file-backed store at `config.store.data_file`
    pub async fn bind(config: &TelemetryConfig) -> Result<Self> {
        let store: Arc<dyn StatusStore> = Arc::new(FileStatusStore::new(&config.store.data_file));
        Self::bind_with_store(config, store).await
    }

    /// Bind using any status store implementation
    pub async fn bind_with_store(
        config: &TelemetryConfig,
        store: Arc<dyn StatusStore>,
    ) -> Result<Self> {
        let addr = config.web.socket_addr()?;
        let state = Arc::new(TelemetryWebState::new(store, config.web.clone()));
        let app = create_app(state)?;

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| TelemetryError::server(format!("failed to bind {addr}: {e}")))?;
        let local_addr = listener.local_addr()?;

        info!(
            %local_addr,
            data_file = %config.store.data_file.display(),
            "Robot telemetry API bound"
        );

        Ok(Self {
            listener,
            app,
            local_addr,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Serve requests until `shutdown` resolves, then drain in-flight requests
    pub async fn run_until<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        info!(local_addr = %self.local_addr, "Robot telemetry API serving");

        axum::serve(self.listener, self.app)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| TelemetryError::server(format!("server error: {e}")))?;

        info!(local_addr = %self.local_addr, "Robot telemetry API stopped");
        Ok(())
    }

    /// Serve in a background task
    pub fn spawn(self) -> TelemetryServerHandle {
        let (shutdown_sender, shutdown_receiver) = oneshot::channel::<()>();
        let local_addr = self.local_addr;

        let join_handle = tokio::spawn(self.run_until(async move {
            let _ = shutdown_receiver.await;
        }));

        TelemetryServerHandle {
            local_addr,
            shutdown_sender: Some(shutdown_sender),
            join_handle,
        }
    }
}

/// Handle to a server running in the background
pub struct TelemetryServerHandle {
    local_addr: SocketAddr,
    shutdown_sender: Option<oneshot::Sender<()>>,
    join_handle: JoinHandle<Result<()>>,
}

impl TelemetryServerHandle {
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.local_addr)
    }

    /// Signal shutdown and wait for the server task to finish
    pub async fn stop(mut self) -> Result<()> {
        match self.shutdown_sender.take() {
            Some(sender) => {
                if sender.send(()).is_err() {
                    warn!("Server task already exited before shutdown was requested");
                }
            }
            None => warn!("Server already stopped"),
        }

        self.join_handle
            .await
            .map_err(|e| TelemetryError::server(format!("server task failed: {e}")))?
    }
}

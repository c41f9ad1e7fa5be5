use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use log::{error, info};
use std::io;
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::FileManagerError;
use crate::middleware::log_request;
use crate::server::handlers;
use crate::storage::{FileStore, SharedFileStore};

/// Shared state injected into all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: SharedFileStore,
}

pub struct Server {
    listener: TcpListener,
    router: Router,
}

impl Server {
    /// Prepares the on-disk directories, builds the store and binds the
    /// listener
    pub async fn new(config: ServerConfig) -> Result<Self, FileManagerError> {
        let mut store = FileStore::open(&config.data_path(), &config.download_path())?;
        if config.seed_demo_tree {
            store.seed_demo_entries()?;
        }

        let state = AppState {
            store: store.into_shared(),
        };

        let socket = config.socket_address();
        let listener = match TcpListener::bind(&socket).await {
            Ok(listener) => {
                info!("Server bound to {}", socket);
                listener
            }
            Err(e) => {
                error!("Failed to bind to {}: {}", socket, e);
                return Err(e.into());
            }
        };

        Ok(Self {
            listener,
            router: build_router(state, config.max_file_size_bytes()),
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    pub async fn start(self) -> io::Result<()> {
        info!("Starting web finder on {}", self.local_addr()?);
        axum::serve(self.listener, self.router).await
    }
}

/// Mounts every route on a router over `state`
pub fn build_router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/files/", get(handlers::show_folder))
        .route("/files/{*path}", get(handlers::show_folder))
        .route("/createFolder", post(handlers::create_folder))
        .route("/uploadFile", post(handlers::upload_file))
        .route("/downloadFile", post(handlers::download_file))
        .route("/deleteFile", post(handlers::delete_file))
        .route("/changeFolderName", post(handlers::change_folder_name))
        .route("/changeFileName", post(handlers::change_file_name))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

//! Application startup and lifecycle management.

use crate::config::EmployeeConfig;
use crate::handlers;
use crate::services::{EmployeeRepository, EmployeeStore, MongoDb};
use axum::{
    middleware::from_fn,
    routing::{get, put},
    Router,
};
use secrecy::ExposeSecret;
use service_core::error::AppError;
use service_core::middleware::{make_request_span, request_id_middleware};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

/// Shared application state, cloned into every request.
#[derive(Clone)]
pub struct AppState {
    pub employees: Arc<dyn EmployeeStore>,
}

impl AppState {
    pub fn new(employees: Arc<dyn EmployeeStore>) -> Self {
        Self { employees }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route(
            "/employee",
            get(handlers::list_employees).post(handlers::create_employee),
        )
        .route(
            "/employee/:id",
            put(handlers::update_employee).delete(handlers::delete_employee),
        )
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span::<axum::body::Body>))
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
    db: MongoDb,
}

impl Application {
    pub async fn build(config: EmployeeConfig) -> Result<Self, AppError> {
        let db = MongoDb::connect(
            config.mongodb.uri.expose_secret(),
            &config.mongodb.database,
            config.mongodb.connect_timeout(),
        )
        .await?;

        let state = AppState::new(Arc::new(EmployeeRepository::new(&db)));
        let router = build_router(state);

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        Ok(Self {
            port,
            listener,
            router,
            db,
        })
    }

    pub fn db(&self) -> &MongoDb {
        &self.db
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serve until Ctrl+C or SIGTERM.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.run_with_shutdown(shutdown_signal()).await
    }

    /// Serve until `signal` resolves, drain in-flight requests, then close the database client.
    pub async fn run_with_shutdown<F>(self, signal: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let result = axum::serve(self.listener, self.router)
            .with_graceful_shutdown(signal)
            .await;

        if let Err(e) = &result {
            tracing::error!("HTTP server error: {}", e);
        }

        self.db.shutdown().await;
        result
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

use crate::models::Employee;
use mongodb::{
    bson::doc, options::ClientOptions, Client as MongoClient, Collection, Database,
};
use service_core::error::AppError;
use std::time::Duration;

pub const EMPLOYEES_COLLECTION: &str = "employees";

#[derive(Clone)]
pub struct MongoDb {
    client: MongoClient,
    db: Database,
}

impl MongoDb {
    /// Create the client and confirm the server answers within `timeout`.
    pub async fn connect(uri: &str, database: &str, timeout: Duration) -> Result<Self, AppError> {
        let db = Self::lazy(uri, database, timeout).await?;

        tracing::info!("Connecting to MongoDB");
        db.health_check().await.map_err(|e| {
            tracing::error!(
                timeout_secs = timeout.as_secs(),
                "MongoDB unreachable within connect timeout: {}",
                e
            );
            e
        })?;

        tracing::info!(database = %database, "Successfully connected to MongoDB database");
        Ok(db)
    }

    /// Build the client without touching the network. The driver connects on first use.
    pub async fn lazy(uri: &str, database: &str, timeout: Duration) -> Result<Self, AppError> {
        let mut options = ClientOptions::parse(uri).await.map_err(|e| {
            tracing::error!("Failed to parse MongoDB connection string: {}", e);
            AppError::from(e)
        })?;
        options.app_name = Some("employee-service".to_string());
        options.connect_timeout = Some(timeout);
        options.server_selection_timeout = Some(timeout);

        let client = MongoClient::with_options(options).map_err(|e| {
            tracing::error!("Failed to create MongoDB client: {}", e);
            AppError::from(e)
        })?;
        let db = client.database(database);

        Ok(Self { client, db })
    }

    pub async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }

    pub fn employees(&self) -> Collection<Employee> {
        self.db.collection(EMPLOYEES_COLLECTION)
    }

    pub fn client(&self) -> &MongoClient {
        &self.client
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub async fn shutdown(self) {
        tracing::info!("Closing MongoDB client");
        self.client.shutdown().await;
    }
}

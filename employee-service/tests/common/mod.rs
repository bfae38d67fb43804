//! Shared helpers for employee-service integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use employee_service::config::{EmployeeConfig, MongoConfig};
use employee_service::models::Employee;
use employee_service::services::{EmployeeStore, MongoDb};
use employee_service::startup::{build_router, AppState, Application};
use http_body_util::BodyExt;
use mongodb::bson::oid::ObjectId;
use secrecy::Secret;
use service_core::config::Config as CoreConfig;
use service_core::error::AppError;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use uuid::Uuid;

/// Store backed by an ordered map, mirroring the MongoDB collection semantics.
#[derive(Default)]
pub struct InMemoryStore {
    docs: Mutex<BTreeMap<ObjectId, Employee>>,
}

impl InMemoryStore {
    pub fn len(&self) -> usize {
        self.docs.lock().unwrap().len()
    }

    pub fn get(&self, id: ObjectId) -> Option<Employee> {
        self.docs.lock().unwrap().get(&id).cloned()
    }
}

#[async_trait]
impl EmployeeStore for InMemoryStore {
    async fn list(&self) -> Result<Vec<Employee>, AppError> {
        Ok(self.docs.lock().unwrap().values().cloned().collect())
    }

    async fn insert(&self, mut employee: Employee) -> Result<ObjectId, AppError> {
        let id = ObjectId::new();
        employee.id = Some(id);
        self.docs.lock().unwrap().insert(id, employee);
        Ok(id)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Employee>, AppError> {
        Ok(self.get(id))
    }

    async fn update(&self, id: ObjectId, employee: Employee) -> Result<bool, AppError> {
        let mut docs = self.docs.lock().unwrap();
        match docs.get_mut(&id) {
            Some(existing) => {
                existing.name = employee.name;
                existing.salary = employee.salary;
                existing.age = employee.age;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: ObjectId) -> Result<u64, AppError> {
        Ok(self.docs.lock().unwrap().remove(&id).map_or(0, |_| 1))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

/// Store whose every call fails the way an unreachable server does.
pub struct FailingStore;

fn storage_down() -> AppError {
    AppError::DatabaseError(anyhow::anyhow!("connection refused"))
}

#[async_trait]
impl EmployeeStore for FailingStore {
    async fn list(&self) -> Result<Vec<Employee>, AppError> {
        Err(storage_down())
    }

    async fn insert(&self, _employee: Employee) -> Result<ObjectId, AppError> {
        Err(storage_down())
    }

    async fn find_by_id(&self, _id: ObjectId) -> Result<Option<Employee>, AppError> {
        Err(storage_down())
    }

    async fn update(&self, _id: ObjectId, _employee: Employee) -> Result<bool, AppError> {
        Err(storage_down())
    }

    async fn delete(&self, _id: ObjectId) -> Result<u64, AppError> {
        Err(storage_down())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Err(storage_down())
    }
}

/// Store that accepts inserts but cannot read the document back.
pub enum LostInsertStore {
    /// `find_by_id` fails with a storage error.
    FetchFails,
    /// `find_by_id` finds nothing.
    FetchMisses,
}

#[async_trait]
impl EmployeeStore for LostInsertStore {
    async fn list(&self) -> Result<Vec<Employee>, AppError> {
        Ok(Vec::new())
    }

    async fn insert(&self, _employee: Employee) -> Result<ObjectId, AppError> {
        Ok(ObjectId::new())
    }

    async fn find_by_id(&self, _id: ObjectId) -> Result<Option<Employee>, AppError> {
        match self {
            LostInsertStore::FetchFails => Err(storage_down()),
            LostInsertStore::FetchMisses => Ok(None),
        }
    }

    async fn update(&self, _id: ObjectId, _employee: Employee) -> Result<bool, AppError> {
        Ok(false)
    }

    async fn delete(&self, _id: ObjectId) -> Result<u64, AppError> {
        Ok(0)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

pub fn router_with(store: Arc<dyn EmployeeStore>) -> Router {
    build_router(AppState::new(store))
}

pub fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Send one request and decode the JSON body (`Null` for an empty body).
pub async fn send(router: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("Router call failed");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();

    let body = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Response body is not JSON")
    };
    (status, body)
}

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub db: MongoDb,
    pub db_name: String,
}

impl TestApp {
    /// Start the real server against MongoDB on a random port, isolated in a fresh database.
    pub async fn spawn() -> Self {
        let uri = std::env::var("MONGODB_URI")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let db_name = format!("employee_test_{}", Uuid::new_v4().simple());

        let config = EmployeeConfig {
            common: CoreConfig { port: 0 },
            mongodb: MongoConfig {
                uri: Secret::new(uri),
                database: db_name.clone(),
                connect_timeout_secs: 5,
            },
            log_level: "debug".to_string(),
        };

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let db = app.db().clone();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            db,
            db_name,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn cleanup(&self) {
        let _ = self.db.client().database(&self.db_name).drop(None).await;
    }
}

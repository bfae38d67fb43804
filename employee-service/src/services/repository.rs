use crate::models::Employee;
use crate::services::database::MongoDb;
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::Collection;
use service_core::error::AppError;

/// Collection-level operations the HTTP handlers depend on.
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Employee>, AppError>;
    /// Returns the identifier generated by storage.
    async fn insert(&self, employee: Employee) -> Result<ObjectId, AppError>;
    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Employee>, AppError>;
    /// Overwrites name, salary and age. `false` when no document has `id`.
    async fn update(&self, id: ObjectId, employee: Employee) -> Result<bool, AppError>;
    /// Number of documents removed.
    async fn delete(&self, id: ObjectId) -> Result<u64, AppError>;
    async fn ping(&self) -> Result<(), AppError>;
}

#[derive(Clone)]
pub struct EmployeeRepository {
    db: MongoDb,
    collection: Collection<Employee>,
}

impl EmployeeRepository {
    pub fn new(db: &MongoDb) -> Self {
        Self {
            db: db.clone(),
            collection: db.employees(),
        }
    }
}

#[async_trait]
impl EmployeeStore for EmployeeRepository {
    async fn list(&self) -> Result<Vec<Employee>, AppError> {
        let cursor = self.collection.find(doc! {}, None).await.map_err(|e| {
            tracing::error!("Failed to query employees: {}", e);
            AppError::from(e)
        })?;

        let employees: Vec<Employee> = cursor.try_collect().await.map_err(|e| {
            tracing::error!("Failed to read employees cursor: {}", e);
            AppError::from(e)
        })?;
        Ok(employees)
    }

    async fn insert(&self, mut employee: Employee) -> Result<ObjectId, AppError> {
        employee.id = None;
        let result = self.collection.insert_one(employee, None).await.map_err(|e| {
            tracing::error!("Failed to insert employee: {}", e);
            AppError::from(e)
        })?;

        result.inserted_id.as_object_id().ok_or_else(|| {
            AppError::InternalError(anyhow::anyhow!(
                "Inserted id is not an ObjectId: {}",
                result.inserted_id
            ))
        })
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Employee>, AppError> {
        let employee = self
            .collection
            .find_one(doc! { "_id": id }, None)
            .await
            .map_err(|e| {
                tracing::error!(employee_id = %id, "Failed to fetch employee: {}", e);
                AppError::from(e)
            })?;
        Ok(employee)
    }

    async fn update(&self, id: ObjectId, employee: Employee) -> Result<bool, AppError> {
        let update = doc! {
            "$set": {
                "name": employee.name,
                "age": employee.age,
                "salary": employee.salary,
            }
        };

        let previous = self
            .collection
            .find_one_and_update(doc! { "_id": id }, update, None)
            .await
            .map_err(|e| {
                tracing::error!(employee_id = %id, "Failed to update employee: {}", e);
                AppError::from(e)
            })?;
        Ok(previous.is_some())
    }

    async fn delete(&self, id: ObjectId) -> Result<u64, AppError> {
        let result = self
            .collection
            .delete_one(doc! { "_id": id }, None)
            .await
            .map_err(|e| {
                tracing::error!(employee_id = %id, "Failed to delete employee: {}", e);
                AppError::from(e)
            })?;
        Ok(result.deleted_count)
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.db.health_check().await
    }
}

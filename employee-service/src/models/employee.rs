use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Persisted shape of a document in the `employees` collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Employee {
    /// Left empty on insert so the driver generates it.
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub salary: f64,
    #[serde(default)]
    pub age: f64,
}

impl Employee {
    pub fn new(name: String, salary: f64, age: f64) -> Self {
        Self {
            id: None,
            name,
            salary,
            age,
        }
    }
}

use crate::models::Employee;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Body of `POST /employee` and `PUT /employee/:id`.
///
/// Absent fields take their zero value. Any `id` sent by the client is
/// dropped during deserialization, whatever its JSON type.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct EmployeeRequest {
    pub name: String,
    pub salary: f64,
    pub age: f64,
}

impl From<EmployeeRequest> for Employee {
    fn from(req: EmployeeRequest) -> Self {
        Employee::new(req.name, req.salary, req.age)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmployeeResponse {
    pub id: String,
    pub name: String,
    pub salary: f64,
    pub age: f64,
}

impl EmployeeResponse {
    pub fn with_id(id: ObjectId, req: EmployeeRequest) -> Self {
        Self {
            id: id.to_hex(),
            name: req.name,
            salary: req.salary,
            age: req.age,
        }
    }
}

impl From<Employee> for EmployeeResponse {
    fn from(employee: Employee) -> Self {
        Self {
            id: employee.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: employee.name,
            salary: employee.salary,
            age: employee.age,
        }
    }
}

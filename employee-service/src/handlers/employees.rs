//! CRUD handlers for the `employees` collection.

use crate::dtos::{EmployeeRequest, EmployeeResponse};
use crate::models::Employee;
use crate::startup::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use mongodb::bson::oid::ObjectId;
use service_core::error::AppError;

fn parse_employee_id(raw: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(raw).map_err(|e| {
        AppError::BadRequest(anyhow::anyhow!("Invalid employee id '{}': {}", raw, e))
    })
}

fn parse_body(
    payload: Result<Json<EmployeeRequest>, JsonRejection>,
) -> Result<EmployeeRequest, AppError> {
    payload
        .map(|Json(req)| req)
        .map_err(|rejection| AppError::BadRequest(anyhow::anyhow!(rejection.body_text())))
}

pub async fn list_employees(
    State(state): State<AppState>,
) -> Result<Json<Vec<EmployeeResponse>>, AppError> {
    let employees = state.employees.list().await?;

    Ok(Json(employees.into_iter().map(EmployeeResponse::from).collect()))
}

pub async fn create_employee(
    State(state): State<AppState>,
    payload: Result<Json<EmployeeRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<EmployeeResponse>), AppError> {
    let req = parse_body(payload)?;

    let id = state.employees.insert(Employee::from(req)).await?;
    tracing::info!(employee_id = %id, "Employee created");

    let created = state
        .employees
        .find_by_id(id)
        .await?
        .ok_or_else(|| {
            AppError::InternalError(anyhow::anyhow!("Employee {} missing right after insert", id))
        })?;

    Ok((StatusCode::CREATED, Json(EmployeeResponse::from(created))))
}

pub async fn update_employee(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    payload: Result<Json<EmployeeRequest>, JsonRejection>,
) -> Result<Json<EmployeeResponse>, AppError> {
    let id = parse_employee_id(&raw_id)?;
    let req = parse_body(payload)?;

    let matched = state.employees.update(id, Employee::from(req.clone())).await?;
    if !matched {
        return Err(AppError::NotFound(anyhow::anyhow!("Employee {} not found", id)));
    }

    tracing::info!(employee_id = %id, "Employee updated");
    Ok(Json(EmployeeResponse::with_id(id, req)))
}

pub async fn delete_employee(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<&'static str>, AppError> {
    let id = parse_employee_id(&raw_id)?;

    let deleted = state.employees.delete(id).await?;
    if deleted < 1 {
        return Err(AppError::NotFound(anyhow::anyhow!("Employee {} not found", id)));
    }

    tracing::info!(employee_id = %id, "Employee deleted");
    Ok(Json("deleted"))
}

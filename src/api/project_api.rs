//! Project API Endpoints
//! Mission: Generate projects and serve CRUD on their per-model records

use crate::api::AppState;
use crate::error::ApiError;
use crate::models::Record;
use crate::templates;
use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub idea: Option<String>,
}

/// An unparseable id cannot name any stored project, so it reads as missing.
fn parse_project_id(id: &str, message: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(id).map_err(|_| ApiError::NotFound(message.into()))
}

/// Generate endpoint - POST /generate
pub async fn generate(
    State(state): State<AppState>,
    Json(payload): Json<GenerateRequest>,
) -> Result<Json<Value>, ApiError> {
    let idea = payload
        .idea
        .filter(|idea| !idea.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("Idea required".into()))?;

    let template = templates::select(&idea);
    let project = state.projects.create(template)?;

    Ok(Json(json!({
        "projectId": project.id,
        "project": project,
    })))
}

/// Get project endpoint - GET /project/:id
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_project_id(&id, "Not found")?;
    let project = state.projects.get_by_id(&id).map_err(|err| match err {
        crate::store::ProjectStoreError::ProjectNotFound => ApiError::NotFound("Not found".into()),
        other => other.into(),
    })?;

    Ok(Json(serde_json::to_value(project).map_err(anyhow::Error::from)?))
}

/// Append record endpoint - POST /project/:id/:model
pub async fn append_record(
    State(state): State<AppState>,
    Path((id, model)): Path<(String, String)>,
    Json(record): Json<Record>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_project_id(&id, "Project not found")?;
    let records = state.projects.append_record(&id, &model, record)?;

    Ok(Json(json!({
        "message": "Record added",
        "records": records,
    })))
}

/// List records endpoint - GET /project/:id/:model
pub async fn list_records(
    State(state): State<AppState>,
    Path((id, model)): Path<(String, String)>,
) -> Result<Json<Vec<Record>>, ApiError> {
    let id = parse_project_id(&id, "Project not found")?;
    let records = state.projects.list_records(&id, &model)?;

    Ok(Json(records))
}

/// Update record endpoint - PUT /project/:id/:model/:index
///
/// `index` is a position into the current list, not a stable identifier; a
/// concurrent delete can shift which record it names.
pub async fn update_record(
    State(state): State<AppState>,
    Path((id, model, index)): Path<(String, String, usize)>,
    Json(patch): Json<Record>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_project_id(&id, "Project not found")?;
    let records = state.projects.update_record(&id, &model, index, patch)?;

    Ok(Json(json!({
        "message": "Record updated",
        "records": records,
    })))
}

/// Delete record endpoint - DELETE /project/:id/:model/:index
pub async fn delete_record(
    State(state): State<AppState>,
    Path((id, model, index)): Path<(String, String, usize)>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_project_id(&id, "Project not found")?;
    let records = state.projects.delete_record(&id, &model, index)?;

    Ok(Json(json!({
        "message": "Record deleted",
        "records": records,
    })))
}

//! Project handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use sea_orm::Set;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use super::DeleteResponse;
use crate::AppState;
use lectern_common::{
    db::models::{Project, ProjectActiveModel, ProjectCategory, ProjectStatus},
    db::Repository,
    errors::{AppError, Result},
};

/// Request to create a new project
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProjectRequest {
    #[validate(length(min = 1, max = 500))]
    pub title: String,

    #[validate(length(min = 1))]
    pub description: String,

    /// One of: lab, research
    pub category: String,

    #[serde(default)]
    pub highlights: Vec<String>,

    #[serde(default)]
    pub display_order: i32,

    pub start_date: Option<NaiveDate>,

    pub end_date: Option<NaiveDate>,

    pub funding_source: Option<String>,

    pub funding_amount: Option<String>,

    /// One of: ongoing, completed, upcoming
    pub status: String,

    #[serde(default)]
    pub tags: Vec<String>,
}

/// Request to update a project; absent fields keep their values
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateProjectRequest {
    #[validate(length(min = 1, max = 500))]
    pub title: Option<String>,

    #[validate(length(min = 1))]
    pub description: Option<String>,

    pub category: Option<String>,

    pub highlights: Option<Vec<String>>,

    pub display_order: Option<i32>,

    pub start_date: Option<NaiveDate>,

    pub end_date: Option<NaiveDate>,

    pub funding_source: Option<String>,

    pub funding_amount: Option<String>,

    pub status: Option<String>,

    pub tags: Option<Vec<String>>,
}

fn parse_category(s: &str) -> Result<ProjectCategory> {
    ProjectCategory::parse(s).ok_or_else(|| AppError::InvalidFormat {
        message: format!("unknown project category '{}'", s),
    })
}

fn parse_status(s: &str) -> Result<ProjectStatus> {
    ProjectStatus::parse(s).ok_or_else(|| AppError::InvalidFormat {
        message: format!("unknown project status '{}'", s),
    })
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound {
        resource_type: "project".to_string(),
        id: id.to_string(),
    }
}

/// List all projects in display order
pub async fn list_projects(State(state): State<AppState>) -> Result<Json<Vec<Project>>> {
    let repo = Repository::new(state.db.clone());
    Ok(Json(repo.list_projects().await?))
}

/// Get a project by ID
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Project>> {
    let repo = Repository::new(state.db.clone());

    let project = repo
        .find_project_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(project))
}

/// Create a new project
pub async fn create_project(
    State(state): State<AppState>,
    Json(request): Json<CreateProjectRequest>,
) -> Result<(StatusCode, Json<Project>)> {
    request.validate()?;
    let category = parse_category(&request.category)?;
    let status = parse_status(&request.status)?;

    let repo = Repository::new(state.db.clone());
    let now = chrono::Utc::now();

    let model = ProjectActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(request.title),
        description: Set(request.description),
        category: Set(category.as_str().to_string()),
        highlights: Set(request.highlights.into()),
        display_order: Set(request.display_order),
        start_date: Set(request.start_date),
        end_date: Set(request.end_date),
        funding_source: Set(request.funding_source),
        funding_amount: Set(request.funding_amount),
        status: Set(status.as_str().to_string()),
        tags: Set(request.tags.into()),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    };

    let project = repo.insert_project(model).await?;

    tracing::info!(project_id = %project.id, "Project created");

    Ok((StatusCode::CREATED, Json(project)))
}

/// Update a project
pub async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateProjectRequest>,
) -> Result<Json<Project>> {
    request.validate()?;

    let repo = Repository::new(state.db.clone());

    let mut model: ProjectActiveModel = repo
        .find_project_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?
        .into();

    if let Some(title) = request.title {
        model.title = Set(title);
    }
    if let Some(description) = request.description {
        model.description = Set(description);
    }
    if let Some(ref category) = request.category {
        model.category = Set(parse_category(category)?.as_str().to_string());
    }
    if let Some(highlights) = request.highlights {
        model.highlights = Set(highlights.into());
    }
    if let Some(display_order) = request.display_order {
        model.display_order = Set(display_order);
    }
    if let Some(start_date) = request.start_date {
        model.start_date = Set(Some(start_date));
    }
    if let Some(end_date) = request.end_date {
        model.end_date = Set(Some(end_date));
    }
    if let Some(funding_source) = request.funding_source {
        model.funding_source = Set(Some(funding_source));
    }
    if let Some(funding_amount) = request.funding_amount {
        model.funding_amount = Set(Some(funding_amount));
    }
    if let Some(ref status) = request.status {
        model.status = Set(parse_status(status)?.as_str().to_string());
    }
    if let Some(tags) = request.tags {
        model.tags = Set(tags.into());
    }
    model.updated_at = Set(chrono::Utc::now().into());

    let project = repo.update_project(model).await?;

    Ok(Json(project))
}

/// Delete a project
pub async fn delete_project(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteResponse>> {
    let repo = Repository::new(state.db.clone());

    if !repo.delete_project(id).await? {
        return Err(not_found(id));
    }

    tracing::info!(project_id = %id, "Project deleted");

    Ok(Json(DeleteResponse { deleted: true }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_accepts_valid_payload() {
        let request: CreateProjectRequest = serde_json::from_value(serde_json::json!({
            "title": "Testbed",
            "description": "A lab testbed",
            "category": "lab",
            "status": "ongoing",
            "start_date": "2024-01-15"
        }))
        .unwrap();
        assert!(request.validate().is_ok());
        assert!(parse_category(&request.category).is_ok());
        assert!(parse_status(&request.status).is_ok());
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!(parse_status("paused").is_err());
        assert!(parse_status("ongoing").is_ok());
    }
}

//! Award handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use sea_orm::Set;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use super::DeleteResponse;
use crate::AppState;
use lectern_common::{
    db::models::{Award, AwardActiveModel},
    db::Repository,
    errors::{AppError, Result},
};

/// Request to create a new award
#[derive(Debug, Deserialize, Validate)]
pub struct CreateAwardRequest {
    #[validate(length(min = 1, max = 300))]
    pub title: String,

    #[validate(range(min = 1900, max = 2100))]
    pub year: i32,

    #[validate(length(min = 1, max = 300))]
    pub organization: String,

    pub description: Option<String>,

    pub image_object_id: Option<Uuid>,

    #[validate(url)]
    pub link: Option<String>,
}

/// Request to update an award; absent fields keep their values
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateAwardRequest {
    #[validate(length(min = 1, max = 300))]
    pub title: Option<String>,

    #[validate(range(min = 1900, max = 2100))]
    pub year: Option<i32>,

    #[validate(length(min = 1, max = 300))]
    pub organization: Option<String>,

    pub description: Option<String>,

    pub image_object_id: Option<Uuid>,

    #[validate(url)]
    pub link: Option<String>,
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound {
        resource_type: "award".to_string(),
        id: id.to_string(),
    }
}

/// List all awards, newest year first
pub async fn list_awards(State(state): State<AppState>) -> Result<Json<Vec<Award>>> {
    let repo = Repository::new(state.db.clone());
    Ok(Json(repo.list_awards().await?))
}

/// Get an award by ID
pub async fn get_award(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Award>> {
    let repo = Repository::new(state.db.clone());

    let award = repo
        .find_award_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(award))
}

/// Create a new award
pub async fn create_award(
    State(state): State<AppState>,
    Json(request): Json<CreateAwardRequest>,
) -> Result<(StatusCode, Json<Award>)> {
    request.validate()?;

    let repo = Repository::new(state.db.clone());
    let now = chrono::Utc::now();

    let model = AwardActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(request.title),
        year: Set(request.year),
        organization: Set(request.organization),
        description: Set(request.description),
        image_object_id: Set(request.image_object_id),
        link: Set(request.link),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    };

    let award = repo.insert_award(model).await?;

    tracing::info!(award_id = %award.id, "Award created");

    Ok((StatusCode::CREATED, Json(award)))
}

/// Update an award
pub async fn update_award(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateAwardRequest>,
) -> Result<Json<Award>> {
    request.validate()?;

    let repo = Repository::new(state.db.clone());

    let mut model: AwardActiveModel = repo
        .find_award_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?
        .into();

    if let Some(title) = request.title {
        model.title = Set(title);
    }
    if let Some(year) = request.year {
        model.year = Set(year);
    }
    if let Some(organization) = request.organization {
        model.organization = Set(organization);
    }
    if let Some(description) = request.description {
        model.description = Set(Some(description));
    }
    if let Some(image_object_id) = request.image_object_id {
        model.image_object_id = Set(Some(image_object_id));
    }
    if let Some(link) = request.link {
        model.link = Set(Some(link));
    }
    model.updated_at = Set(chrono::Utc::now().into());

    let award = repo.update_award(model).await?;

    Ok(Json(award))
}

/// Delete an award
pub async fn delete_award(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteResponse>> {
    let repo = Repository::new(state.db.clone());

    if !repo.delete_award(id).await? {
        return Err(not_found(id));
    }

    tracing::info!(award_id = %id, "Award deleted");

    Ok(Json(DeleteResponse { deleted: true }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_requires_organization() {
        let request: std::result::Result<CreateAwardRequest, _> =
            serde_json::from_value(serde_json::json!({
                "title": "Best Paper",
                "year": 2024
            }));
        assert!(request.is_err());
    }

    #[test]
    fn create_request_rejects_bad_link() {
        let request: CreateAwardRequest = serde_json::from_value(serde_json::json!({
            "title": "Best Paper",
            "year": 2024,
            "organization": "ACM",
            "link": "not a url"
        }))
        .unwrap();
        assert!(request.validate().is_err());
    }
}

//! Publication handlers

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
    db::models::{Publication, PublicationActiveModel, PublicationCategory},
    db::Repository,
    errors::{AppError, Result},
};

/// Request to create a new publication
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePublicationRequest {
    #[validate(length(min = 1, max = 500))]
    pub title: String,

    #[validate(length(min = 1))]
    pub authors: Vec<String>,

    /// One of: journal, conference, patent
    pub category: String,

    #[validate(length(min = 1, max = 300))]
    pub venue: String,

    #[validate(range(min = 1900, max = 2100))]
    pub year: i32,

    pub doi: Option<String>,

    #[validate(url)]
    pub link: Option<String>,

    pub citation: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    pub pdf_object_id: Option<Uuid>,

    #[serde(default)]
    pub featured: bool,
}

/// Request to update a publication; absent fields keep their values
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdatePublicationRequest {
    #[validate(length(min = 1, max = 500))]
    pub title: Option<String>,

    #[validate(length(min = 1))]
    pub authors: Option<Vec<String>>,

    pub category: Option<String>,

    #[validate(length(min = 1, max = 300))]
    pub venue: Option<String>,

    #[validate(range(min = 1900, max = 2100))]
    pub year: Option<i32>,

    pub doi: Option<String>,

    #[validate(url)]
    pub link: Option<String>,

    pub citation: Option<String>,

    pub tags: Option<Vec<String>>,

    pub pdf_object_id: Option<Uuid>,

    pub featured: Option<bool>,
}

fn parse_category(s: &str) -> Result<PublicationCategory> {
    PublicationCategory::parse(s).ok_or_else(|| AppError::InvalidFormat {
        message: format!("unknown publication category '{}'", s),
    })
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound {
        resource_type: "publication".to_string(),
        id: id.to_string(),
    }
}

/// List all publications, newest year first
pub async fn list_publications(State(state): State<AppState>) -> Result<Json<Vec<Publication>>> {
    let repo = Repository::new(state.db.clone());
    Ok(Json(repo.list_publications().await?))
}

/// Get a publication by ID
pub async fn get_publication(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Publication>> {
    let repo = Repository::new(state.db.clone());

    let publication = repo
        .find_publication_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(publication))
}

/// Create a new publication
pub async fn create_publication(
    State(state): State<AppState>,
    Json(request): Json<CreatePublicationRequest>,
) -> Result<(StatusCode, Json<Publication>)> {
    request.validate()?;
    let category = parse_category(&request.category)?;

    let repo = Repository::new(state.db.clone());
    let now = chrono::Utc::now();

    let model = PublicationActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(request.title),
        authors: Set(request.authors.into()),
        category: Set(category.as_str().to_string()),
        venue: Set(request.venue),
        year: Set(request.year),
        doi: Set(request.doi),
        link: Set(request.link),
        citation: Set(request.citation),
        tags: Set(request.tags.into()),
        pdf_object_id: Set(request.pdf_object_id),
        featured: Set(request.featured),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    };

    let publication = repo.insert_publication(model).await?;

    tracing::info!(publication_id = %publication.id, "Publication created");

    Ok((StatusCode::CREATED, Json(publication)))
}

/// Update a publication
pub async fn update_publication(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdatePublicationRequest>,
) -> Result<Json<Publication>> {
    request.validate()?;

    let repo = Repository::new(state.db.clone());

    let mut model: PublicationActiveModel = repo
        .find_publication_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?
        .into();

    if let Some(title) = request.title {
        model.title = Set(title);
    }
    if let Some(authors) = request.authors {
        model.authors = Set(authors.into());
    }
    if let Some(ref category) = request.category {
        model.category = Set(parse_category(category)?.as_str().to_string());
    }
    if let Some(venue) = request.venue {
        model.venue = Set(venue);
    }
    if let Some(year) = request.year {
        model.year = Set(year);
    }
    if let Some(doi) = request.doi {
        model.doi = Set(Some(doi));
    }
    if let Some(link) = request.link {
        model.link = Set(Some(link));
    }
    if let Some(citation) = request.citation {
        model.citation = Set(Some(citation));
    }
    if let Some(tags) = request.tags {
        model.tags = Set(tags.into());
    }
    if let Some(pdf_object_id) = request.pdf_object_id {
        model.pdf_object_id = Set(Some(pdf_object_id));
    }
    if let Some(featured) = request.featured {
        model.featured = Set(featured);
    }
    model.updated_at = Set(chrono::Utc::now().into());

    let publication = repo.update_publication(model).await?;

    Ok(Json(publication))
}

/// Delete a publication
pub async fn delete_publication(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteResponse>> {
    let repo = Repository::new(state.db.clone());

    if !repo.delete_publication(id).await? {
        return Err(not_found(id));
    }

    tracing::info!(publication_id = %id, "Publication deleted");

    Ok(Json(DeleteResponse { deleted: true }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> serde_json::Value {
        serde_json::json!({
            "title": "On Testing",
            "authors": ["A. Author"],
            "category": "journal",
            "venue": "Journal of Tests",
            "year": 2024
        })
    }

    #[test]
    fn create_request_accepts_valid_payload() {
        let request: CreatePublicationRequest = serde_json::from_value(valid_request()).unwrap();
        assert!(request.validate().is_ok());
        assert!(parse_category(&request.category).is_ok());
    }

    #[test]
    fn create_request_rejects_empty_authors() {
        let mut payload = valid_request();
        payload["authors"] = serde_json::json!([]);
        let request: CreatePublicationRequest = serde_json::from_value(payload).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn create_request_rejects_unknown_category() {
        let mut payload = valid_request();
        payload["category"] = serde_json::json!("preprint");
        let request: CreatePublicationRequest = serde_json::from_value(payload).unwrap();
        assert!(parse_category(&request.category).is_err());
    }

    #[test]
    fn update_request_allows_partial_payload() {
        let request: UpdatePublicationRequest =
            serde_json::from_value(serde_json::json!({ "year": 2025 })).unwrap();
        assert!(request.validate().is_ok());
        assert!(request.title.is_none());
    }

    #[test]
    fn update_request_still_validates_present_fields() {
        let request: UpdatePublicationRequest =
            serde_json::from_value(serde_json::json!({ "year": 1500 })).unwrap();
        assert!(request.validate().is_err());
    }
}

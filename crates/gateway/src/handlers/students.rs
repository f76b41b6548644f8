//! Student handlers
//!
//! Publication/project references are checked for existence on write;
//! they remain weak links and may dangle after later deletions.

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
    db::models::{Student, StudentActiveModel, StudentCategory},
    db::Repository,
    errors::{AppError, Result},
};

/// Request to create a new student
#[derive(Debug, Deserialize, Validate)]
pub struct CreateStudentRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,

    /// One of: current, alumni, opportunity
    pub category: String,

    #[validate(email)]
    pub email: Option<String>,

    pub degree: Option<String>,

    pub research_area: Option<String>,

    pub start_date: Option<NaiveDate>,

    pub end_date: Option<NaiveDate>,

    #[serde(default)]
    pub links: Vec<String>,

    #[serde(default)]
    pub achievements: Vec<String>,

    #[serde(default)]
    pub publication_ids: Vec<Uuid>,

    #[serde(default)]
    pub project_ids: Vec<Uuid>,
}

/// Request to update a student; absent fields keep their values
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateStudentRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,

    pub category: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    pub degree: Option<String>,

    pub research_area: Option<String>,

    pub start_date: Option<NaiveDate>,

    pub end_date: Option<NaiveDate>,

    pub links: Option<Vec<String>>,

    pub achievements: Option<Vec<String>>,

    pub publication_ids: Option<Vec<Uuid>>,

    pub project_ids: Option<Vec<Uuid>>,
}

fn parse_category(s: &str) -> Result<StudentCategory> {
    StudentCategory::parse(s).ok_or_else(|| AppError::InvalidFormat {
        message: format!("unknown student category '{}'", s),
    })
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound {
        resource_type: "student".to_string(),
        id: id.to_string(),
    }
}

/// Reject references to publications or projects that do not exist
async fn check_references(
    repo: &Repository,
    publication_ids: &[Uuid],
    project_ids: &[Uuid],
) -> Result<()> {
    let missing = repo.missing_publication_ids(publication_ids).await?;
    if !missing.is_empty() {
        return Err(AppError::Validation {
            message: format!("unknown publication ids: {:?}", missing),
            field: Some("publication_ids".to_string()),
        });
    }

    let missing = repo.missing_project_ids(project_ids).await?;
    if !missing.is_empty() {
        return Err(AppError::Validation {
            message: format!("unknown project ids: {:?}", missing),
            field: Some("project_ids".to_string()),
        });
    }

    Ok(())
}

/// List all students by name
pub async fn list_students(State(state): State<AppState>) -> Result<Json<Vec<Student>>> {
    let repo = Repository::new(state.db.clone());
    Ok(Json(repo.list_students().await?))
}

/// Get a student by ID
pub async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Student>> {
    let repo = Repository::new(state.db.clone());

    let student = repo
        .find_student_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(student))
}

/// Create a new student
pub async fn create_student(
    State(state): State<AppState>,
    Json(request): Json<CreateStudentRequest>,
) -> Result<(StatusCode, Json<Student>)> {
    request.validate()?;
    let category = parse_category(&request.category)?;

    let repo = Repository::new(state.db.clone());
    check_references(&repo, &request.publication_ids, &request.project_ids).await?;

    let now = chrono::Utc::now();

    let model = StudentActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(request.name),
        category: Set(category.as_str().to_string()),
        email: Set(request.email),
        degree: Set(request.degree),
        research_area: Set(request.research_area),
        start_date: Set(request.start_date),
        end_date: Set(request.end_date),
        links: Set(request.links.into()),
        achievements: Set(request.achievements.into()),
        publication_ids: Set(request.publication_ids.into()),
        project_ids: Set(request.project_ids.into()),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    };

    let student = repo.insert_student(model).await?;

    tracing::info!(student_id = %student.id, "Student created");

    Ok((StatusCode::CREATED, Json(student)))
}

/// Update a student
pub async fn update_student(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateStudentRequest>,
) -> Result<Json<Student>> {
    request.validate()?;

    let repo = Repository::new(state.db.clone());

    check_references(
        &repo,
        request.publication_ids.as_deref().unwrap_or(&[]),
        request.project_ids.as_deref().unwrap_or(&[]),
    )
    .await?;

    let mut model: StudentActiveModel = repo
        .find_student_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?
        .into();

    if let Some(name) = request.name {
        model.name = Set(name);
    }
    if let Some(ref category) = request.category {
        model.category = Set(parse_category(category)?.as_str().to_string());
    }
    if let Some(email) = request.email {
        model.email = Set(Some(email));
    }
    if let Some(degree) = request.degree {
        model.degree = Set(Some(degree));
    }
    if let Some(research_area) = request.research_area {
        model.research_area = Set(Some(research_area));
    }
    if let Some(start_date) = request.start_date {
        model.start_date = Set(Some(start_date));
    }
    if let Some(end_date) = request.end_date {
        model.end_date = Set(Some(end_date));
    }
    if let Some(links) = request.links {
        model.links = Set(links.into());
    }
    if let Some(achievements) = request.achievements {
        model.achievements = Set(achievements.into());
    }
    if let Some(publication_ids) = request.publication_ids {
        model.publication_ids = Set(publication_ids.into());
    }
    if let Some(project_ids) = request.project_ids {
        model.project_ids = Set(project_ids.into());
    }
    model.updated_at = Set(chrono::Utc::now().into());

    let student = repo.update_student(model).await?;

    Ok(Json(student))
}

/// Delete a student
pub async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteResponse>> {
    let repo = Repository::new(state.db.clone());

    if !repo.delete_student(id).await? {
        return Err(not_found(id));
    }

    tracing::info!(student_id = %id, "Student deleted");

    Ok(Json(DeleteResponse { deleted: true }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_accepts_valid_payload() {
        let request: CreateStudentRequest = serde_json::from_value(serde_json::json!({
            "name": "Grace Hopper",
            "category": "alumni",
            "degree": "PhD"
        }))
        .unwrap();
        assert!(request.validate().is_ok());
        assert!(parse_category(&request.category).is_ok());
    }

    #[test]
    fn unknown_category_is_rejected() {
        assert!(parse_category("prospective").is_err());
    }
}

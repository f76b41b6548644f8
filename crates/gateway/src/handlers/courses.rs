//! Course handlers

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
    db::models::{Course, CourseActiveModel, CourseLevel, Semester},
    db::Repository,
    errors::{AppError, Result},
};

/// Request to create a new course
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCourseRequest {
    #[validate(length(min = 1, max = 50))]
    pub code: String,

    #[validate(length(min = 1, max = 300))]
    pub title: String,

    #[serde(default)]
    pub description: String,

    /// One of: Undergraduate, Graduate
    pub level: String,

    /// One of: Fall, Spring, Summer
    pub semester: String,

    #[validate(range(min = 1900, max = 2100))]
    pub year: i32,

    #[serde(default)]
    pub highlights: Vec<String>,

    #[serde(default)]
    pub display_order: i32,
}

/// Request to update a course; absent fields keep their values
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateCourseRequest {
    #[validate(length(min = 1, max = 50))]
    pub code: Option<String>,

    #[validate(length(min = 1, max = 300))]
    pub title: Option<String>,

    pub description: Option<String>,

    pub level: Option<String>,

    pub semester: Option<String>,

    #[validate(range(min = 1900, max = 2100))]
    pub year: Option<i32>,

    pub highlights: Option<Vec<String>>,

    pub display_order: Option<i32>,
}

fn parse_level(s: &str) -> Result<CourseLevel> {
    CourseLevel::parse(s).ok_or_else(|| AppError::InvalidFormat {
        message: format!("unknown course level '{}'", s),
    })
}

fn parse_semester(s: &str) -> Result<Semester> {
    Semester::parse(s).ok_or_else(|| AppError::InvalidFormat {
        message: format!("unknown semester '{}'", s),
    })
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound {
        resource_type: "course".to_string(),
        id: id.to_string(),
    }
}

/// List all courses in display order
pub async fn list_courses(State(state): State<AppState>) -> Result<Json<Vec<Course>>> {
    let repo = Repository::new(state.db.clone());
    Ok(Json(repo.list_courses().await?))
}

/// Get a course by ID
pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Course>> {
    let repo = Repository::new(state.db.clone());

    let course = repo
        .find_course_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(course))
}

/// Create a new course
pub async fn create_course(
    State(state): State<AppState>,
    Json(request): Json<CreateCourseRequest>,
) -> Result<(StatusCode, Json<Course>)> {
    request.validate()?;
    let level = parse_level(&request.level)?;
    let semester = parse_semester(&request.semester)?;

    let repo = Repository::new(state.db.clone());
    let now = chrono::Utc::now();

    let model = CourseActiveModel {
        id: Set(Uuid::new_v4()),
        code: Set(request.code),
        title: Set(request.title),
        description: Set(request.description),
        level: Set(level.as_str().to_string()),
        semester: Set(semester.as_str().to_string()),
        year: Set(request.year),
        highlights: Set(request.highlights.into()),
        display_order: Set(request.display_order),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    };

    let course = repo.insert_course(model).await?;

    tracing::info!(course_id = %course.id, code = %course.code, "Course created");

    Ok((StatusCode::CREATED, Json(course)))
}

/// Update a course
pub async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateCourseRequest>,
) -> Result<Json<Course>> {
    request.validate()?;

    let repo = Repository::new(state.db.clone());

    let mut model: CourseActiveModel = repo
        .find_course_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?
        .into();

    if let Some(code) = request.code {
        model.code = Set(code);
    }
    if let Some(title) = request.title {
        model.title = Set(title);
    }
    if let Some(description) = request.description {
        model.description = Set(description);
    }
    if let Some(ref level) = request.level {
        model.level = Set(parse_level(level)?.as_str().to_string());
    }
    if let Some(ref semester) = request.semester {
        model.semester = Set(parse_semester(semester)?.as_str().to_string());
    }
    if let Some(year) = request.year {
        model.year = Set(year);
    }
    if let Some(highlights) = request.highlights {
        model.highlights = Set(highlights.into());
    }
    if let Some(display_order) = request.display_order {
        model.display_order = Set(display_order);
    }
    model.updated_at = Set(chrono::Utc::now().into());

    let course = repo.update_course(model).await?;

    Ok(Json(course))
}

/// Delete a course
pub async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteResponse>> {
    let repo = Repository::new(state.db.clone());

    if !repo.delete_course(id).await? {
        return Err(not_found(id));
    }

    tracing::info!(course_id = %id, "Course deleted");

    Ok(Json(DeleteResponse { deleted: true }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_accepts_valid_payload() {
        let request: CreateCourseRequest = serde_json::from_value(serde_json::json!({
            "code": "CS 501",
            "title": "Distributed Systems",
            "level": "Graduate",
            "semester": "Fall",
            "year": 2025
        }))
        .unwrap();
        assert!(request.validate().is_ok());
        assert!(parse_level(&request.level).is_ok());
        assert!(parse_semester(&request.semester).is_ok());
    }

    #[test]
    fn lowercase_semester_is_rejected() {
        assert!(parse_semester("fall").is_err());
    }
}

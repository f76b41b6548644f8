//! Profile handlers (singleton record)

use axum::{extract::State, Json};
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::AppState;
use lectern_common::{
    db::models::{
        EducationEntry, EducationList, Profile, ProfileActiveModel, SocialLink, SocialLinks,
        StringList, PROFILE_SLOT,
    },
    db::Repository,
    errors::Result,
};

/// Request to write the profile; always an upsert, never a 404
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,

    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[validate(email)]
    pub email: Option<String>,

    pub phone: Option<String>,

    pub office: Option<String>,

    #[serde(default)]
    pub biography: String,

    #[serde(default)]
    pub education: Vec<EducationEntry>,

    #[serde(default)]
    pub research_interests: Vec<String>,

    #[serde(default)]
    pub social_links: Vec<SocialLink>,

    pub image_object_id: Option<Uuid>,

    #[serde(default)]
    pub taglines: Vec<String>,
}

/// Profile as returned to clients; empty default when none exists yet
#[derive(Debug, Default, Serialize)]
pub struct ProfileResponse {
    pub id: Option<Uuid>,
    pub name: String,
    pub title: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub office: Option<String>,
    pub biography: String,
    pub education: EducationList,
    pub research_interests: StringList,
    pub social_links: SocialLinks,
    pub image_object_id: Option<Uuid>,
    pub taglines: StringList,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        Self {
            id: Some(profile.id),
            name: profile.name,
            title: profile.title,
            email: profile.email,
            phone: profile.phone,
            office: profile.office,
            biography: profile.biography,
            education: profile.education,
            research_interests: profile.research_interests,
            social_links: profile.social_links,
            image_object_id: profile.image_object_id,
            taglines: profile.taglines,
            created_at: Some(profile.created_at.to_rfc3339()),
            updated_at: Some(profile.updated_at.to_rfc3339()),
        }
    }
}

/// Get the profile, or an empty default if none has been written yet
pub async fn get_profile(State(state): State<AppState>) -> Result<Json<ProfileResponse>> {
    let repo = Repository::new(state.db.clone());

    let response = match repo.get_profile().await? {
        Some(profile) => ProfileResponse::from(profile),
        None => ProfileResponse::default(),
    };

    Ok(Json(response))
}

/// Upsert the profile: creates on first write, updates thereafter
pub async fn update_profile(
    State(state): State<AppState>,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>> {
    request.validate()?;

    let repo = Repository::new(state.db.clone());
    let now = chrono::Utc::now();

    let model = ProfileActiveModel {
        id: Set(Uuid::new_v4()),
        slot: Set(PROFILE_SLOT),
        name: Set(request.name),
        title: Set(request.title),
        email: Set(request.email),
        phone: Set(request.phone),
        office: Set(request.office),
        biography: Set(request.biography),
        education: Set(EducationList(request.education)),
        research_interests: Set(request.research_interests.into()),
        social_links: Set(SocialLinks(request.social_links)),
        image_object_id: Set(request.image_object_id),
        taglines: Set(request.taglines.into()),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    };

    let profile = repo.upsert_profile(model).await?;

    tracing::info!(profile_id = %profile.id, "Profile upserted");

    Ok(Json(ProfileResponse::from(profile)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_default_has_no_id() {
        let response = ProfileResponse::default();
        assert!(response.id.is_none());
        assert!(response.name.is_empty());
        assert!(response.education.0.is_empty());
    }

    #[test]
    fn request_rejects_blank_name() {
        let request: UpdateProfileRequest = serde_json::from_value(serde_json::json!({
            "name": "",
            "title": "Professor"
        }))
        .unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn request_rejects_malformed_email() {
        let request: UpdateProfileRequest = serde_json::from_value(serde_json::json!({
            "name": "Ada Lovelace",
            "title": "Professor",
            "email": "not-an-email"
        }))
        .unwrap();
        assert!(request.validate().is_err());
    }
}

//! Profile entity (singleton)
//!
//! Exactly one profile row exists per deployment. The `slot` column is
//! always 0 and carries a unique index, so the upsert path can never
//! create a second row.

use super::fields::{EducationList, SocialLinks, StringList};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Fixed value for the singleton slot column
pub const PROFILE_SLOT: i16 = 0;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "profile")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Singleton guard, always 0
    #[sea_orm(unique)]
    pub slot: i16,

    #[sea_orm(column_type = "Text")]
    pub name: String,

    #[sea_orm(column_type = "Text")]
    pub title: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub email: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub phone: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub office: Option<String>,

    #[sea_orm(column_type = "Text")]
    pub biography: String,

    #[sea_orm(column_type = "JsonBinary")]
    pub education: EducationList,

    #[sea_orm(column_type = "JsonBinary")]
    pub research_interests: StringList,

    #[sea_orm(column_type = "JsonBinary")]
    pub social_links: SocialLinks,

    /// Reference to a stored image object, may dangle after file deletion
    pub image_object_id: Option<Uuid>,

    /// Rotating tagline strings, displayed in order
    #[sea_orm(column_type = "JsonBinary")]
    pub taglines: StringList,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

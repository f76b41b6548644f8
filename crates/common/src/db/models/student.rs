//! Student entity
//!
//! Publication and project references are weak links by identifier.
//! Existence is checked when a student is written; a referenced record
//! may still be deleted afterwards, leaving a dangling id.

use super::fields::{StringList, UuidList};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Student category enum
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudentCategory {
    Current,
    Alumni,
    Opportunity,
}

impl StudentCategory {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "current" => Some(StudentCategory::Current),
            "alumni" => Some(StudentCategory::Alumni),
            "opportunity" => Some(StudentCategory::Opportunity),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StudentCategory::Current => "current",
            StudentCategory::Alumni => "alumni",
            StudentCategory::Opportunity => "opportunity",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(column_type = "Text")]
    pub name: String,

    /// One of: current, alumni, opportunity
    #[sea_orm(column_type = "Text")]
    pub category: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub email: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub degree: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub research_area: Option<String>,

    pub start_date: Option<Date>,

    pub end_date: Option<Date>,

    #[sea_orm(column_type = "JsonBinary")]
    pub links: StringList,

    #[sea_orm(column_type = "JsonBinary")]
    pub achievements: StringList,

    /// Weak references to publications by identifier
    #[sea_orm(column_type = "JsonBinary")]
    pub publication_ids: UuidList,

    /// Weak references to projects by identifier
    #[sea_orm(column_type = "JsonBinary")]
    pub project_ids: UuidList,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

impl Model {
    /// Get the category as an enum
    pub fn student_category(&self) -> Option<StudentCategory> {
        StudentCategory::parse(&self.category)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

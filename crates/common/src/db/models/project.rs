//! Project entity

use super::fields::StringList;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Project category enum
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectCategory {
    Lab,
    Research,
}

impl ProjectCategory {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "lab" => Some(ProjectCategory::Lab),
            "research" => Some(ProjectCategory::Research),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectCategory::Lab => "lab",
            ProjectCategory::Research => "research",
        }
    }
}

/// Project status enum
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Ongoing,
    Completed,
    Upcoming,
}

impl ProjectStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ongoing" => Some(ProjectStatus::Ongoing),
            "completed" => Some(ProjectStatus::Completed),
            "upcoming" => Some(ProjectStatus::Upcoming),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Ongoing => "ongoing",
            ProjectStatus::Completed => "completed",
            ProjectStatus::Upcoming => "upcoming",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(column_type = "Text")]
    pub title: String,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    /// One of: lab, research
    #[sea_orm(column_type = "Text")]
    pub category: String,

    /// Ordered highlight lines for display
    #[sea_orm(column_type = "JsonBinary")]
    pub highlights: StringList,

    pub display_order: i32,

    pub start_date: Option<Date>,

    pub end_date: Option<Date>,

    #[sea_orm(column_type = "Text", nullable)]
    pub funding_source: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub funding_amount: Option<String>,

    /// One of: ongoing, completed, upcoming
    #[sea_orm(column_type = "Text")]
    pub status: String,

    #[sea_orm(column_type = "JsonBinary")]
    pub tags: StringList,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

impl Model {
    /// Get the category as an enum
    pub fn project_category(&self) -> Option<ProjectCategory> {
        ProjectCategory::parse(&self.category)
    }

    /// Get the status as an enum
    pub fn project_status(&self) -> Option<ProjectStatus> {
        ProjectStatus::parse(&self.status)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

//! Course entity

use super::fields::StringList;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Course level enum; wire form is capitalized
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CourseLevel {
    Undergraduate,
    Graduate,
}

impl CourseLevel {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Undergraduate" => Some(CourseLevel::Undergraduate),
            "Graduate" => Some(CourseLevel::Graduate),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CourseLevel::Undergraduate => "Undergraduate",
            CourseLevel::Graduate => "Graduate",
        }
    }
}

/// Semester enum; wire form is capitalized
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Semester {
    Fall,
    Spring,
    Summer,
}

impl Semester {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Fall" => Some(Semester::Fall),
            "Spring" => Some(Semester::Spring),
            "Summer" => Some(Semester::Summer),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Semester::Fall => "Fall",
            Semester::Spring => "Spring",
            Semester::Summer => "Summer",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(column_type = "Text")]
    pub code: String,

    #[sea_orm(column_type = "Text")]
    pub title: String,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    /// One of: Undergraduate, Graduate
    #[sea_orm(column_type = "Text")]
    pub level: String,

    /// One of: Fall, Spring, Summer
    #[sea_orm(column_type = "Text")]
    pub semester: String,

    pub year: i32,

    #[sea_orm(column_type = "JsonBinary")]
    pub highlights: StringList,

    pub display_order: i32,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

impl Model {
    /// Get the level as an enum
    pub fn course_level(&self) -> Option<CourseLevel> {
        CourseLevel::parse(&self.level)
    }

    /// Get the semester as an enum
    pub fn course_semester(&self) -> Option<Semester> {
        Semester::parse(&self.semester)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_and_semester_reject_lowercase() {
        assert!(CourseLevel::parse("undergraduate").is_none());
        assert!(Semester::parse("fall").is_none());
        assert_eq!(Semester::parse("Fall").unwrap().as_str(), "Fall");
    }
}

//! Publication entity

use super::fields::StringList;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Publication category enum
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublicationCategory {
    Journal,
    Conference,
    Patent,
}

impl PublicationCategory {
    /// Parse a stored/wire value, rejecting unknown categories
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "journal" => Some(PublicationCategory::Journal),
            "conference" => Some(PublicationCategory::Conference),
            "patent" => Some(PublicationCategory::Patent),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PublicationCategory::Journal => "journal",
            PublicationCategory::Conference => "conference",
            PublicationCategory::Patent => "patent",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "publications")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(column_type = "Text")]
    pub title: String,

    #[sea_orm(column_type = "JsonBinary")]
    pub authors: StringList,

    /// One of: journal, conference, patent
    #[sea_orm(column_type = "Text")]
    pub category: String,

    #[sea_orm(column_type = "Text")]
    pub venue: String,

    pub year: i32,

    #[sea_orm(column_type = "Text", nullable)]
    pub doi: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub link: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub citation: Option<String>,

    #[sea_orm(column_type = "JsonBinary")]
    pub tags: StringList,

    /// Reference to the stored PDF object, may dangle after file deletion
    pub pdf_object_id: Option<Uuid>,

    pub featured: bool,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

impl Model {
    /// Get the category as an enum
    pub fn publication_category(&self) -> Option<PublicationCategory> {
        PublicationCategory::parse(&self.category)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parse_round_trip() {
        for value in ["journal", "conference", "patent"] {
            let category = PublicationCategory::parse(value).unwrap();
            assert_eq!(category.as_str(), value);
        }
        assert!(PublicationCategory::parse("preprint").is_none());
    }
}

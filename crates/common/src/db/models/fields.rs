//! Shared JSONB field types
//!
//! Typed wrappers for list-shaped columns stored as JSONB.

use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A JSONB-backed list of strings
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct StringList(pub Vec<String>);

impl From<Vec<String>> for StringList {
    fn from(items: Vec<String>) -> Self {
        Self(items)
    }
}

/// A JSONB-backed list of object identifiers
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct UuidList(pub Vec<Uuid>);

impl From<Vec<Uuid>> for UuidList {
    fn from(items: Vec<Uuid>) -> Self {
        Self(items)
    }
}

/// One education entry on the profile
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    pub year: i32,
}

/// A JSONB-backed list of education entries
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct EducationList(pub Vec<EducationEntry>);

/// A labelled external link
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub label: String,
    pub url: String,
}

/// A JSONB-backed list of social links
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct SocialLinks(pub Vec<SocialLink>);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_list_serializes_as_plain_array() {
        let list = StringList(vec!["systems".into(), "networks".into()]);
        let json = serde_json::to_value(&list).unwrap();
        assert_eq!(json, serde_json::json!(["systems", "networks"]));
    }

    #[test]
    fn education_entry_round_trips() {
        let entry = EducationEntry {
            degree: "PhD".into(),
            institution: "MIT".into(),
            year: 2010,
        };
        let json = serde_json::to_string(&entry).unwrap();
        let back: EducationEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }
}

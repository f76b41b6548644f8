//! Stored binary object metadata entity
//!
//! One row per uploaded file; owns an ordered sequence of chunk rows.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "blob_objects")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(column_type = "Text")]
    pub filename: String,

    #[sea_orm(column_type = "Text")]
    pub content_type: String,

    /// Total payload length in bytes
    pub length: i64,

    /// Extensible metadata as JSONB
    #[sea_orm(column_type = "JsonBinary")]
    pub metadata: Json,

    pub uploaded_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::blob_chunk::Entity")]
    Chunks,
}

impl Related<super::blob_chunk::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Chunks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

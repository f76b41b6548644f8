//! Stored binary object chunk entity
//!
//! Chunks for one object, read in ascending `chunk_index` order and
//! concatenated, reproduce the original byte stream exactly.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "blob_chunks")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub object_id: Uuid,

    /// Position of this chunk in the original byte stream
    pub chunk_index: i32,

    pub data: Vec<u8>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::blob_object::Entity",
        from = "Column::ObjectId",
        to = "super::blob_object::Column::Id",
        on_delete = "Cascade"
    )]
    Object,
}

impl Related<super::blob_object::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Object.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

//! Award entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "awards")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(column_type = "Text")]
    pub title: String,

    pub year: i32,

    #[sea_orm(column_type = "Text")]
    pub organization: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,

    /// Reference to a stored image object, may dangle after file deletion
    pub image_object_id: Option<Uuid>,

    #[sea_orm(column_type = "Text", nullable)]
    pub link: Option<String>,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

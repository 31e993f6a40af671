use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "interpretation_details")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_name = "reading_id")]
    pub reading_id: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub lang: String,
    #[sea_orm(primary_key, auto_increment = false, column_name = "use_llm")]
    pub use_llm: bool,
    #[sea_orm(column_type = "Json")]
    pub details: Json,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::readings::Entity",
        from = "Column::ReadingId",
        to = "super::readings::Column::Id",
        on_delete = "Cascade"
    )]
    Reading,
}

impl Related<super::readings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reading.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

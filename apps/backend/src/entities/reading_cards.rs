use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reading_cards")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_name = "reading_id")]
    pub reading_id: String,
    #[sea_orm(primary_key, auto_increment = false, column_type = "SmallInteger")]
    pub position: i16,
    #[sea_orm(column_name = "is_reversed")]
    pub is_reversed: bool,
    #[sea_orm(column_name = "card_id")]
    pub card_id: i32,
    #[sea_orm(column_name = "card_name")]
    pub card_name: String,
    pub arcana: String,
    pub suit: Option<String>,
    #[sea_orm(column_name = "image_url")]
    pub image_url: Option<String>,
    #[sea_orm(column_name = "upright_meaning", column_type = "Json", nullable)]
    pub upright_meaning: Option<Json>,
    #[sea_orm(column_name = "reversed_meaning", column_type = "Json", nullable)]
    pub reversed_meaning: Option<Json>,
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

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "readings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(column_type = "Text")]
    pub question: String,
    #[sea_orm(column_name = "ord_a")]
    pub ord_a: String,
    #[sea_orm(column_name = "ord_b")]
    pub ord_b: String,
    #[sea_orm(column_name = "ord_c")]
    pub ord_c: String,
    #[sea_orm(column_name = "shuffle_times", column_type = "SmallInteger")]
    pub shuffle_times: i16,
    pub seed: Option<i64>,
    #[sea_orm(column_name = "allow_reversed")]
    pub allow_reversed: bool,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::reading_cards::Entity")]
    ReadingCards,
    #[sea_orm(has_many = "super::share_links::Entity")]
    ShareLinks,
}

impl Related<super::reading_cards::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ReadingCards.def()
    }
}

impl Related<super::share_links::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ShareLinks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

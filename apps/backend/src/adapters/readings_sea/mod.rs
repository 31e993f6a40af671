//! SeaORM adapter for readings, their caches and share links - generic over ConnectionTrait.

use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use time::OffsetDateTime;

use crate::domain::{Interpretation, Reading};
use crate::entities::{interpretation_details, interpretations, reading_cards, readings, share_links};

pub mod dto;

use dto::InterpretationColumns;

/// Insert the reading header and every card row in one transaction.
pub async fn insert_reading<C>(conn: &C, reading: &Reading) -> Result<(), DbErr>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync,
{
    let cards = dto::card_actives(reading)?;
    let txn = conn.begin().await?;
    readings::Entity::insert(dto::reading_active(reading))
        .exec_without_returning(&txn)
        .await?;
    if !cards.is_empty() {
        reading_cards::Entity::insert_many(cards)
            .exec_without_returning(&txn)
            .await?;
    }
    txn.commit().await
}

pub async fn reading_exists<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: &str,
) -> Result<bool, DbErr> {
    Ok(readings::Entity::find_by_id(id.to_string())
        .one(conn)
        .await?
        .is_some())
}

pub async fn find_reading<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: &str,
) -> Result<Option<Reading>, DbErr> {
    let Some(header) = readings::Entity::find_by_id(id.to_string()).one(conn).await? else {
        return Ok(None);
    };
    let cards = reading_cards::Entity::find()
        .filter(reading_cards::Column::ReadingId.eq(id))
        .order_by_asc(reading_cards::Column::Position)
        .all(conn)
        .await?;
    dto::reading_from_rows(header, cards).map(Some)
}

pub async fn find_interpretation<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    reading_id: &str,
    lang: &str,
    style: &str,
    use_llm: bool,
) -> Result<Option<Interpretation>, DbErr> {
    interpretations::Entity::find_by_id((
        reading_id.to_string(),
        lang.to_string(),
        style.to_string(),
        use_llm,
    ))
    .one(conn)
    .await?
    .map(dto::interpretation_from_row)
    .transpose()
}

/// Insert or replace the cached interpretation for the key.
pub async fn upsert_interpretation<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    reading_id: &str,
    lang: &str,
    style: &str,
    use_llm: bool,
    interpretation: &Interpretation,
) -> Result<(), DbErr> {
    let cols = InterpretationColumns::from_domain(interpretation)?;
    let active = interpretations::ActiveModel {
        reading_id: Set(reading_id.to_string()),
        lang: Set(lang.to_string()),
        style: Set(style.to_string()),
        use_llm: Set(use_llm),
        summary: Set(cols.summary),
        positions: Set(cols.positions),
        advices: Set(cols.advices),
        llm_used: Set(cols.llm_used),
        sections: Set(cols.sections),
        created_at: Set(OffsetDateTime::now_utc()),
    };
    interpretations::Entity::insert(active)
        .on_conflict(
            OnConflict::columns([
                interpretations::Column::ReadingId,
                interpretations::Column::Lang,
                interpretations::Column::Style,
                interpretations::Column::UseLlm,
            ])
            .update_columns([
                interpretations::Column::Summary,
                interpretations::Column::Positions,
                interpretations::Column::Advices,
                interpretations::Column::LlmUsed,
                interpretations::Column::Sections,
                interpretations::Column::CreatedAt,
            ])
            .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;
    Ok(())
}

pub async fn find_details<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    reading_id: &str,
    lang: &str,
    use_llm: bool,
) -> Result<Option<Vec<String>>, DbErr> {
    interpretation_details::Entity::find_by_id((
        reading_id.to_string(),
        lang.to_string(),
        use_llm,
    ))
    .one(conn)
    .await?
    .map(|row| dto::details_from_json(row.details))
    .transpose()
}

pub async fn upsert_details<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    reading_id: &str,
    lang: &str,
    use_llm: bool,
    details: &[String],
) -> Result<(), DbErr> {
    let active = interpretation_details::ActiveModel {
        reading_id: Set(reading_id.to_string()),
        lang: Set(lang.to_string()),
        use_llm: Set(use_llm),
        details: Set(dto::details_to_json(details)?),
        created_at: Set(OffsetDateTime::now_utc()),
    };
    interpretation_details::Entity::insert(active)
        .on_conflict(
            OnConflict::columns([
                interpretation_details::Column::ReadingId,
                interpretation_details::Column::Lang,
                interpretation_details::Column::UseLlm,
            ])
            .update_columns([
                interpretation_details::Column::Details,
                interpretation_details::Column::CreatedAt,
            ])
            .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;
    Ok(())
}

pub async fn find_slug_for_reading<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    reading_id: &str,
) -> Result<Option<String>, DbErr> {
    Ok(share_links::Entity::find()
        .filter(share_links::Column::ReadingId.eq(reading_id))
        .one(conn)
        .await?
        .map(|row| row.slug))
}

pub async fn find_reading_for_slug<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    slug: &str,
) -> Result<Option<String>, DbErr> {
    Ok(share_links::Entity::find_by_id(slug.to_string())
        .one(conn)
        .await?
        .map(|row| row.reading_id))
}

/// Plain insert; a duplicate slug surfaces as a unique violation.
pub async fn insert_share_link<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    slug: &str,
    reading_id: &str,
) -> Result<(), DbErr> {
    let active = share_links::ActiveModel {
        slug: Set(slug.to_string()),
        reading_id: Set(reading_id.to_string()),
        created_at: Set(OffsetDateTime::now_utc()),
    };
    share_links::Entity::insert(active)
        .exec_without_returning(conn)
        .await?;
    Ok(())
}

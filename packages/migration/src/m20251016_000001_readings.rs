use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKey, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Readings {
    Table,
    Id,
    Question,
    OrdA,
    OrdB,
    OrdC,
    ShuffleTimes,
    Seed,
    AllowReversed,
    CreatedAt,
}

#[derive(Iden)]
enum ReadingCards {
    Table,
    ReadingId,
    Position,
    IsReversed,
    CardId,
    CardName,
    Arcana,
    Suit,
    ImageUrl,
    UprightMeaning,
    ReversedMeaning,
}

#[derive(Iden)]
enum Interpretations {
    Table,
    ReadingId,
    Lang,
    Style,
    UseLlm,
    Summary,
    Positions,
    Advices,
    LlmUsed,
    Sections,
    CreatedAt,
}

#[derive(Iden)]
enum InterpretationDetails {
    Table,
    ReadingId,
    Lang,
    UseLlm,
    Details,
    CreatedAt,
}

#[derive(Iden)]
enum ShareLinks {
    Table,
    Slug,
    ReadingId,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Readings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Readings::Id)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Readings::Question).text().not_null())
                    .col(ColumnDef::new(Readings::OrdA).string_len(1).not_null())
                    .col(ColumnDef::new(Readings::OrdB).string_len(1).not_null())
                    .col(ColumnDef::new(Readings::OrdC).string_len(1).not_null())
                    .col(
                        ColumnDef::new(Readings::ShuffleTimes)
                            .small_integer()
                            .not_null()
                            .default(1),
                    )
                    .col(ColumnDef::new(Readings::Seed).big_integer().null())
                    .col(
                        ColumnDef::new(Readings::AllowReversed)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Readings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ReadingCards::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ReadingCards::ReadingId)
                            .string_len(36)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ReadingCards::Position)
                            .small_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ReadingCards::IsReversed).boolean().not_null())
                    .col(ColumnDef::new(ReadingCards::CardId).integer().not_null())
                    .col(ColumnDef::new(ReadingCards::CardName).text().not_null())
                    .col(ColumnDef::new(ReadingCards::Arcana).text().not_null())
                    .col(ColumnDef::new(ReadingCards::Suit).text().null())
                    .col(ColumnDef::new(ReadingCards::ImageUrl).text().null())
                    .col(ColumnDef::new(ReadingCards::UprightMeaning).json().null())
                    .col(ColumnDef::new(ReadingCards::ReversedMeaning).json().null())
                    .primary_key(
                        Index::create()
                            .col(ReadingCards::ReadingId)
                            .col(ReadingCards::Position),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reading_cards_reading")
                            .from(ReadingCards::Table, ReadingCards::ReadingId)
                            .to(Readings::Table, Readings::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Interpretations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Interpretations::ReadingId)
                            .string_len(36)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Interpretations::Lang).string_len(16).not_null())
                    .col(ColumnDef::new(Interpretations::Style).string_len(32).not_null())
                    .col(ColumnDef::new(Interpretations::UseLlm).boolean().not_null())
                    .col(ColumnDef::new(Interpretations::Summary).text().not_null())
                    .col(ColumnDef::new(Interpretations::Positions).json().not_null())
                    .col(ColumnDef::new(Interpretations::Advices).json().not_null())
                    .col(ColumnDef::new(Interpretations::LlmUsed).boolean().not_null())
                    .col(ColumnDef::new(Interpretations::Sections).json().null())
                    .col(
                        ColumnDef::new(Interpretations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(Interpretations::ReadingId)
                            .col(Interpretations::Lang)
                            .col(Interpretations::Style)
                            .col(Interpretations::UseLlm),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_interpretations_reading")
                            .from(Interpretations::Table, Interpretations::ReadingId)
                            .to(Readings::Table, Readings::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(InterpretationDetails::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(InterpretationDetails::ReadingId)
                            .string_len(36)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InterpretationDetails::Lang)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InterpretationDetails::UseLlm)
                            .boolean()
                            .not_null(),
                    )
                    .col(ColumnDef::new(InterpretationDetails::Details).json().not_null())
                    .col(
                        ColumnDef::new(InterpretationDetails::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(InterpretationDetails::ReadingId)
                            .col(InterpretationDetails::Lang)
                            .col(InterpretationDetails::UseLlm),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_interpretation_details_reading")
                            .from(InterpretationDetails::Table, InterpretationDetails::ReadingId)
                            .to(Readings::Table, Readings::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ShareLinks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ShareLinks::Slug)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ShareLinks::ReadingId)
                            .string_len(36)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(ShareLinks::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_share_links_reading")
                            .from(ShareLinks::Table, ShareLinks::ReadingId)
                            .to(Readings::Table, Readings::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // drop in reverse order
        manager
            .drop_table(Table::drop().table(ShareLinks::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(InterpretationDetails::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(Interpretations::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(ReadingCards::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Readings::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}

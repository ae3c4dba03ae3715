//! Initial schema for Thrifty.
//!
//! - `icons`: content-addressed icon payloads, unique by `hash`
//! - `flows`: budget entries, each pointing at one icon
//! - `tags`: deduplicated tag labels
//! - `flows_tags`: flow to tag associations

use sea_orm_migration::prelude::*;

/// Id of the reserved icon every flow falls back to. The row itself is seeded
/// by the engine at startup.
pub const DEFAULT_ICON_ID: &str = "00000000-0000-0000-0000-000000000000";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Icons {
    Table,
    Id,
    Data,
    Hash,
}

#[derive(Iden)]
enum Flows {
    Table,
    Id,
    Name,
    Description,
    Amount,
    IconId,
}

#[derive(Iden)]
enum Tags {
    Table,
    Id,
    Tag,
}

#[derive(Iden)]
enum FlowsTags {
    Table,
    FlowId,
    TagId,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Icons::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Icons::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Icons::Data).text().not_null())
                    .col(ColumnDef::new(Icons::Hash).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-icons-hash")
                    .table(Icons::Table)
                    .col(Icons::Hash)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Flows::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Flows::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Flows::Name).string().not_null())
                    .col(
                        ColumnDef::new(Flows::Description)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Flows::Amount).double().not_null())
                    .col(
                        ColumnDef::new(Flows::IconId)
                            .string()
                            .not_null()
                            .default(DEFAULT_ICON_ID),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-flows-icon_id")
                            .from(Flows::Table, Flows::IconId)
                            .to(Icons::Table, Icons::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-flows-icon_id")
                    .table(Flows::Table)
                    .col(Flows::IconId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Tags::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Tags::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Tags::Tag).string().not_null().unique_key())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(FlowsTags::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(FlowsTags::FlowId).string().not_null())
                    .col(ColumnDef::new(FlowsTags::TagId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(FlowsTags::FlowId)
                            .col(FlowsTags::TagId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-flows_tags-flow_id")
                            .from(FlowsTags::Table, FlowsTags::FlowId)
                            .to(Flows::Table, Flows::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-flows_tags-tag_id")
                            .from(FlowsTags::Table, FlowsTags::TagId)
                            .to(Tags::Table, Tags::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-flows_tags-tag_id")
                    .table(FlowsTags::Table)
                    .col(FlowsTags::TagId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FlowsTags::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Tags::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Flows::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Icons::Table).to_owned())
            .await?;
        Ok(())
    }
}

use sea_orm_migration::prelude::*;

use crate::m20250301_000001_create_auth_tables::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Events::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Events::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Events::Name).string().not_null())
                    .col(ColumnDef::new(Events::Description).text().null())
                    .col(ColumnDef::new(Events::Date).date().not_null())
                    .col(ColumnDef::new(Events::Price).double().not_null().default(0.0))
                    .col(ColumnDef::new(Events::Capacity).integer().not_null().default(0))
                    .col(ColumnDef::new(Events::ImageUrl).string().null())
                    .col(ColumnDef::new(Events::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Events::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(EventRegistrations::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(EventRegistrations::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(EventRegistrations::EventId).string().not_null())
                    .col(ColumnDef::new(EventRegistrations::UserId).string().not_null())
                    .col(ColumnDef::new(EventRegistrations::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_event_registrations_event_id")
                            .from(EventRegistrations::Table, EventRegistrations::EventId)
                            .to(Events::Table, Events::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_event_registrations_user_id")
                            .from(EventRegistrations::Table, EventRegistrations::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_event_registrations_event_user")
                    .table(EventRegistrations::Table)
                    .col(EventRegistrations::EventId)
                    .col(EventRegistrations::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Promotions::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Promotions::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Promotions::Name).string().not_null())
                    .col(ColumnDef::new(Promotions::Description).text().null())
                    .col(ColumnDef::new(Promotions::DiscountPercent).double().not_null().default(0.0))
                    .col(ColumnDef::new(Promotions::StartDate).date().not_null())
                    .col(ColumnDef::new(Promotions::EndDate).date().not_null())
                    .col(ColumnDef::new(Promotions::ApplicableRoomTypes).text().not_null().default("[]"))
                    .col(ColumnDef::new(Promotions::ApplicableServices).text().not_null().default("[]"))
                    .col(ColumnDef::new(Promotions::Active).boolean().not_null().default(true))
                    .col(ColumnDef::new(Promotions::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Services::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Services::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Services::Name).string().not_null())
                    .col(ColumnDef::new(Services::Description).text().null())
                    .col(ColumnDef::new(Services::Price).double().not_null())
                    .col(ColumnDef::new(Services::Category).string().not_null())
                    .col(ColumnDef::new(Services::Available).boolean().not_null().default(true))
                    .col(ColumnDef::new(Services::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Services::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Promotions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(EventRegistrations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Events::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Events {
    Table,
    Id,
    Name,
    Description,
    Date,
    Price,
    Capacity,
    ImageUrl,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum EventRegistrations {
    Table,
    Id,
    EventId,
    UserId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Promotions {
    Table,
    Id,
    Name,
    Description,
    DiscountPercent,
    StartDate,
    EndDate,
    ApplicableRoomTypes,
    ApplicableServices,
    Active,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Services {
    Table,
    Id,
    Name,
    Description,
    Price,
    Category,
    Available,
    CreatedAt,
}

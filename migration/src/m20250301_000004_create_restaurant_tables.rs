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
                    .table(MenuItems::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(MenuItems::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(MenuItems::Name).string().not_null())
                    .col(ColumnDef::new(MenuItems::Description).text().null())
                    .col(ColumnDef::new(MenuItems::Price).double().not_null())
                    .col(ColumnDef::new(MenuItems::Category).string().not_null())
                    .col(ColumnDef::new(MenuItems::ImageUrl).string().null())
                    .col(ColumnDef::new(MenuItems::Available).boolean().not_null().default(true))
                    .col(ColumnDef::new(MenuItems::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TableReservations::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(TableReservations::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(TableReservations::UserId).string().not_null())
                    .col(ColumnDef::new(TableReservations::Date).date().not_null())
                    .col(ColumnDef::new(TableReservations::Time).time().not_null())
                    .col(ColumnDef::new(TableReservations::Guests).integer().not_null().default(2))
                    .col(ColumnDef::new(TableReservations::TableNumber).string().null())
                    .col(ColumnDef::new(TableReservations::Status).string().not_null().default("pending"))
                    .col(ColumnDef::new(TableReservations::Notes).text().null())
                    .col(ColumnDef::new(TableReservations::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_table_reservations_user_id")
                            .from(TableReservations::Table, TableReservations::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_table_reservations_date")
                    .table(TableReservations::Table)
                    .col(TableReservations::Date)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TableReservations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MenuItems::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum MenuItems {
    Table,
    Id,
    Name,
    Description,
    Price,
    Category,
    ImageUrl,
    Available,
    CreatedAt,
}

#[derive(DeriveIden)]
enum TableReservations {
    Table,
    Id,
    UserId,
    Date,
    Time,
    Guests,
    TableNumber,
    Status,
    Notes,
    CreatedAt,
}

//! Migration: Add indexes for the booking conflict query and alert lookups.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Serves the overlap predicate: facility + time range scans
        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_facility_time")
                    .table(Bookings::Table)
                    .col(Bookings::FacilityId)
                    .col(Bookings::StartTime)
                    .col(Bookings::EndTime)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_status")
                    .table(Bookings::Table)
                    .col(Bookings::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_system_alerts_user_id")
                    .table(SystemAlerts::Table)
                    .col(SystemAlerts::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_system_alerts_user_id")
                    .table(SystemAlerts::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_bookings_status")
                    .table(Bookings::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_bookings_facility_time")
                    .table(Bookings::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(Iden)]
enum Bookings {
    Table,
    FacilityId,
    StartTime,
    EndTime,
    Status,
}

#[derive(Iden)]
enum SystemAlerts {
    Table,
    UserId,
}

//! Migration: Create the core booking tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Users::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::FirstName).string().null())
                    .col(ColumnDef::new(Users::LastName).string().null())
                    .col(ColumnDef::new(Users::Role).string_len(20).not_null())
                    .col(ColumnDef::new(Users::Status).string_len(20).not_null())
                    .col(ColumnDef::new(Users::BanReason).text().null())
                    .col(
                        ColumnDef::new(Users::BanEndDate)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Users::BannedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Facilities::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Facilities::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Facilities::Name).string().not_null())
                    .col(ColumnDef::new(Facilities::Description).text().null())
                    .col(ColumnDef::new(Facilities::Capacity).integer().not_null())
                    .col(
                        ColumnDef::new(Facilities::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Facilities::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Facilities::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Bookings::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Bookings::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Bookings::UserId).uuid().not_null())
                    .col(ColumnDef::new(Bookings::FacilityId).uuid().not_null())
                    .col(
                        ColumnDef::new(Bookings::StartTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Bookings::EndTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Bookings::Purpose).text().not_null())
                    .col(ColumnDef::new(Bookings::Status).string_len(20).not_null())
                    .col(ColumnDef::new(Bookings::Equipment).json_binary().null())
                    .col(ColumnDef::new(Bookings::AdminResponse).text().null())
                    .col(
                        ColumnDef::new(Bookings::EquipmentStatus)
                            .json_binary()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Bookings::ArrivalConfirmed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Bookings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Bookings::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bookings_user")
                            .from(Bookings::Table, Bookings::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bookings_facility")
                            .from(Bookings::Table, Bookings::FacilityId)
                            .to(Facilities::Table, Facilities::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ActivityLogs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ActivityLogs::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ActivityLogs::UserId).uuid().not_null())
                    .col(ColumnDef::new(ActivityLogs::Action).string().not_null())
                    .col(ColumnDef::new(ActivityLogs::Details).text().null())
                    .col(ColumnDef::new(ActivityLogs::IpAddress).string().null())
                    .col(ColumnDef::new(ActivityLogs::UserAgent).text().null())
                    .col(
                        ColumnDef::new(ActivityLogs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SystemAlerts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SystemAlerts::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SystemAlerts::AlertType).string().not_null())
                    .col(
                        ColumnDef::new(SystemAlerts::Severity)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(ColumnDef::new(SystemAlerts::Title).string().not_null())
                    .col(ColumnDef::new(SystemAlerts::Message).text().not_null())
                    .col(ColumnDef::new(SystemAlerts::Metadata).json_binary().null())
                    .col(ColumnDef::new(SystemAlerts::UserId).uuid().null())
                    .col(
                        ColumnDef::new(SystemAlerts::IsRead)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(SystemAlerts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SystemAlerts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Faqs::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Faqs::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Faqs::Question).text().not_null())
                    .col(ColumnDef::new(Faqs::Answer).text().not_null())
                    .col(ColumnDef::new(Faqs::Category).string().null())
                    .col(
                        ColumnDef::new(Faqs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Faqs::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop in reverse dependency order
        manager
            .drop_table(Table::drop().table(Faqs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SystemAlerts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ActivityLogs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Bookings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Facilities::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
    Email,
    FirstName,
    LastName,
    Role,
    Status,
    BanReason,
    BanEndDate,
    BannedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Facilities {
    Table,
    Id,
    Name,
    Description,
    Capacity,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Bookings {
    Table,
    Id,
    UserId,
    FacilityId,
    StartTime,
    EndTime,
    Purpose,
    Status,
    Equipment,
    AdminResponse,
    EquipmentStatus,
    ArrivalConfirmed,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum ActivityLogs {
    Table,
    Id,
    UserId,
    Action,
    Details,
    IpAddress,
    UserAgent,
    CreatedAt,
}

#[derive(Iden)]
enum SystemAlerts {
    Table,
    Id,
    AlertType,
    Severity,
    Title,
    Message,
    Metadata,
    UserId,
    IsRead,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Faqs {
    Table,
    Id,
    Question,
    Answer,
    Category,
    CreatedAt,
    UpdatedAt,
}

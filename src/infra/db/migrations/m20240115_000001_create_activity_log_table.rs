//! Migration: Create the activity log table.
//!
//! `order_id` carries no foreign key: log entries must outlive the
//! orders they reference.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ActivityLog::Table)
                    .col(
                        ColumnDef::new(ActivityLog::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ActivityLog::ActorId).uuid().not_null())
                    .col(ColumnDef::new(ActivityLog::Action).string().not_null())
                    .col(ColumnDef::new(ActivityLog::Description).string().not_null())
                    .col(ColumnDef::new(ActivityLog::OrderId).uuid().null())
                    .col(ColumnDef::new(ActivityLog::OrderRef).string().null())
                    .col(ColumnDef::new(ActivityLog::CustomerRef).string().null())
                    .col(
                        ColumnDef::new(ActivityLog::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // The read path is always newest-first
        manager
            .create_index(
                Index::create()
                    .name("idx_activity_log_created_at")
                    .table(ActivityLog::Table)
                    .col(ActivityLog::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_activity_log_created_at")
                    .table(ActivityLog::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(ActivityLog::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ActivityLog {
    Table,
    Id,
    ActorId,
    Action,
    Description,
    OrderId,
    OrderRef,
    CustomerRef,
    CreatedAt,
}

//! Database migrations.
//!
//! Each migration is a separate module following SeaORM conventions.
//! Migration names follow the pattern: m{YYYYMMDD}_{NNNNNN}_{description}

use sea_orm_migration::prelude::*;

mod m20240101_000001_create_users_tables;
mod m20240105_000001_create_products_table;
mod m20240110_000001_create_orders_table;
mod m20240115_000001_create_activity_log_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_users_tables::Migration),
            Box::new(m20240105_000001_create_products_table::Migration),
            Box::new(m20240110_000001_create_orders_table::Migration),
            Box::new(m20240115_000001_create_activity_log_table::Migration),
        ]
    }
}

pub use sea_orm_migration::prelude::*;

mod m20260601_000001_create_user_accounts_table;
mod m20260601_000002_create_departments_table;
mod m20260601_000003_create_graduates_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260601_000001_create_user_accounts_table::Migration),
            Box::new(m20260601_000002_create_departments_table::Migration),
            Box::new(m20260601_000003_create_graduates_table::Migration),
        ]
    }
}

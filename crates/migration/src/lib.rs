pub use sea_orm_migration::prelude::*;

pub use m20240601_000000_init::DEFAULT_ICON_ID;

mod m20240601_000000_init;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20240601_000000_init::Migration)]
    }
}

pub use sea_orm_migration::prelude::*;
pub use sea_orm_migration::sea_orm::{ConnectionTrait, DatabaseConnection};

mod m20251016_000001_readings; // keep filename + module name in sync

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20251016_000001_readings::Migration)]
    }
}

/// Apply every pending migration.
///
/// Every table is created with `IF NOT EXISTS`, so running this on each
/// startup against an already-initialized database is a no-op.
pub async fn migrate_up(db: &DatabaseConnection) -> Result<(), DbErr> {
    let before = count_applied_migrations(db).await.unwrap_or(0);
    let defined = Migrator::migrations().len();
    tracing::info!(defined, applied = before, "running schema migrations");

    match Migrator::up(db, None).await {
        Ok(()) => {
            let after = count_applied_migrations(db).await.unwrap_or(0);
            tracing::info!(applied = after, "schema up to date");
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %e, "schema migration failed");
            Err(e)
        }
    }
}

/// Count the number of migrations that have been applied to the database.
/// Returns 0 if the migration table doesn't exist yet.
pub async fn count_applied_migrations(db: &DatabaseConnection) -> Result<usize, DbErr> {
    match Migrator::get_applied_migrations(db).await {
        Ok(migrations) => Ok(migrations.len()),
        Err(DbErr::Exec(_)) => Ok(0), // Migration table doesn't exist yet
        Err(e) => Err(e),
    }
}

use std::time::Duration;

use db_migration::Migrator;
use sea_orm::{ConnectOptions, Database};
use sea_orm_migration::MigratorTrait;

pub use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, TransactionTrait};

pub mod entities;
pub mod models;

pub type DbPool = DatabaseConnection;

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct DBService {
    pub pool: DbPool,
}

impl DBService {
    /// Connects to `database_url` and brings the schema up to date.
    pub async fn new(database_url: &str) -> Result<DBService, DbErr> {
        let mut options = ConnectOptions::new(database_url.to_owned());
        options
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .sqlx_logging(false);

        let pool = Database::connect(options).await?;
        Migrator::up(&pool, None).await?;
        tracing::debug!(backend = ?pool.get_database_backend(), "Database ready");

        Ok(DBService { pool })
    }

    pub async fn close(self) -> Result<(), DbErr> {
        self.pool.close().await
    }
}

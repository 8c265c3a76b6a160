use async_trait::async_trait;
use config::{Config, ConfigError};
use db::{DBService, DbErr};
use services::services::task::TaskService;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeploymentError {
    #[error(transparent)]
    Database(#[from] DbErr),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Everything a router needs to serve requests. Clones share the same
/// connection pool and services.
#[async_trait]
pub trait Deployment: Clone + Send + Sync + 'static {
    async fn new(config: Config) -> Result<Self, DeploymentError>;

    fn config(&self) -> &Config;

    fn db(&self) -> &DBService;

    fn tasks(&self) -> &TaskService;
}

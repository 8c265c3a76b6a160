use std::sync::Arc;

use async_trait::async_trait;
use config::Config;
use db::DBService;
use deployment::{Deployment, DeploymentError};
use services::services::task::{DbTaskRepository, TaskRepository, TaskService};

#[derive(Clone)]
pub struct LocalDeployment {
    config: Arc<Config>,
    db: DBService,
    tasks: TaskService,
}

#[async_trait]
impl Deployment for LocalDeployment {
    async fn new(config: Config) -> Result<Self, DeploymentError> {
        let db = DBService::new(&config.database_url).await?;
        let repository = Arc::new(DbTaskRepository::new(db.clone()));

        tracing::info!("Connected to task database");
        Ok(Self::from_parts(config, db, repository))
    }

    fn config(&self) -> &Config {
        &self.config
    }

    fn db(&self) -> &DBService {
        &self.db
    }

    fn tasks(&self) -> &TaskService {
        &self.tasks
    }
}

impl LocalDeployment {
    /// Assembles a deployment around an already-open database and an
    /// arbitrary task repository.
    pub fn from_parts(
        config: Config,
        db: DBService,
        repository: Arc<dyn TaskRepository>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            db,
            tasks: TaskService::new(repository),
        }
    }

    pub async fn shutdown(self) {
        if let Err(e) = self.db.close().await {
            tracing::warn!("Failed to close database pool: {}", e);
        }
    }
}

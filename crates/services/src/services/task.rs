use std::sync::Arc;

use async_trait::async_trait;
use db::{DBService, DbErr, models::task::Task};

/// Storage port for task records.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Task>, DbErr>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Task>, DbErr>;

    /// Inserts when `task.id` is `None`, otherwise overwrites that row.
    async fn save(&self, task: Task) -> Result<Task, DbErr>;

    /// Overwrites an existing row only; `None` when the id is unknown.
    async fn update(&self, id: i64, task: Task) -> Result<Option<Task>, DbErr>;

    /// No-op when the row is already gone; returns rows affected.
    async fn delete_by_id(&self, id: i64) -> Result<u64, DbErr>;
}

#[derive(Clone)]
pub struct DbTaskRepository {
    db: DBService,
}

impl DbTaskRepository {
    pub fn new(db: DBService) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TaskRepository for DbTaskRepository {
    async fn find_all(&self) -> Result<Vec<Task>, DbErr> {
        Task::find_all(&self.db.pool).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Task>, DbErr> {
        Task::find_by_id(&self.db.pool, id).await
    }

    async fn save(&self, task: Task) -> Result<Task, DbErr> {
        Task::save(&self.db.pool, task).await
    }

    async fn update(&self, id: i64, task: Task) -> Result<Option<Task>, DbErr> {
        Task::update(&self.db.pool, id, task).await
    }

    async fn delete_by_id(&self, id: i64) -> Result<u64, DbErr> {
        Task::delete_by_id(&self.db.pool, id).await
    }
}

/// Outcome of looking a task up by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskLookup {
    Found(Task),
    NotFound(i64),
}

impl TaskLookup {
    fn from_option(id: i64, task: Option<Task>) -> Self {
        match task {
            Some(task) => TaskLookup::Found(task),
            None => TaskLookup::NotFound(id),
        }
    }
}

#[derive(Clone)]
pub struct TaskService {
    repository: Arc<dyn TaskRepository>,
}

impl TaskService {
    pub fn new(repository: Arc<dyn TaskRepository>) -> Self {
        Self { repository }
    }

    pub async fn list_all(&self) -> Result<Vec<Task>, DbErr> {
        tracing::debug!("Listing tasks");
        self.repository.find_all().await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<TaskLookup, DbErr> {
        tracing::debug!(task_id = id, "Loading task");
        let task = self.repository.find_by_id(id).await?;
        Ok(TaskLookup::from_option(id, task))
    }

    pub async fn save(&self, task: Task) -> Result<Task, DbErr> {
        tracing::debug!(task_id = ?task.id, title = ?task.title, "Saving task");
        self.repository.save(task).await
    }

    /// Replaces the stored fields of task `id`. A row that disappeared since
    /// it was loaded comes back as `NotFound` and is not recreated.
    pub async fn update(&self, id: i64, task: Task) -> Result<TaskLookup, DbErr> {
        tracing::debug!(task_id = id, "Updating task");
        let task = self.repository.update(id, task).await?;
        Ok(TaskLookup::from_option(id, task))
    }

    /// Existence is the caller's concern; this always hits the repository.
    pub async fn delete_by_id(&self, id: i64) -> Result<u64, DbErr> {
        tracing::debug!(task_id = id, "Deleting task");
        self.repository.delete_by_id(id).await
    }
}

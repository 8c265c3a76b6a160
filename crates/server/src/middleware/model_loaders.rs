use axum::{
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use db::{DbErr, models::task::Task};
use deployment::Deployment;
use services::services::task::{TaskLookup, TaskService};

pub trait ModelLoaderDeps {
    fn task_service(&self) -> &TaskService;
}

impl<D> ModelLoaderDeps for D
where
    D: Deployment,
{
    fn task_service(&self) -> &TaskService {
        self.tasks()
    }
}

fn found_or_status(task_id: i64, lookup: Result<TaskLookup, DbErr>) -> Result<Task, StatusCode> {
    match lookup {
        Ok(TaskLookup::Found(task)) => Ok(task),
        Ok(TaskLookup::NotFound(id)) => {
            tracing::warn!("Task {id} not found");
            Err(StatusCode::NOT_FOUND)
        }
        Err(error) => {
            tracing::error!("Failed to fetch Task {task_id}: {error}");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Resolves `{task_id}` before the handler runs. A missing task ends the
/// request with an empty 404.
pub async fn load_task_middleware<S>(
    State(deployment): State<S>,
    Path(task_id): Path<i64>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode>
where
    S: ModelLoaderDeps,
{
    let lookup = deployment.task_service().get_by_id(task_id).await;
    let task = found_or_status(task_id, lookup)?;

    request.extensions_mut().insert(task);
    Ok(next.run(request).await)
}

use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::Json as ResponseJson,
};
use db::models::task::Task;
use deployment::Deployment;
use services::services::task::TaskLookup;

use super::{dto::TaskDto, mapper};
use crate::{DeploymentImpl, error::ApiError};

pub async fn get_tasks(
    State(deployment): State<DeploymentImpl>,
) -> Result<ResponseJson<Vec<TaskDto>>, ApiError> {
    let tasks = deployment.tasks().list_all().await?;

    Ok(ResponseJson(tasks.into_iter().map(mapper::to_dto).collect()))
}

pub async fn get_task(Extension(task): Extension<Task>) -> ResponseJson<TaskDto> {
    ResponseJson(mapper::to_dto(task))
}

pub async fn create_task(
    State(deployment): State<DeploymentImpl>,
    Json(payload): Json<TaskDto>,
) -> Result<ResponseJson<TaskDto>, ApiError> {
    let mut task = mapper::to_record(payload);
    if let Some(ignored) = task.id.take() {
        tracing::debug!(ignored_id = ignored, "Dropping client-supplied id on create");
    }

    tracing::debug!(title = ?task.title, "Creating task");
    let task = deployment.tasks().save(task).await?;

    Ok(ResponseJson(mapper::to_dto(task)))
}

pub async fn update_task(
    Extension(mut existing_task): Extension<Task>,
    State(deployment): State<DeploymentImpl>,
    Json(payload): Json<TaskDto>,
) -> Result<ResponseJson<TaskDto>, ApiError> {
    let id = existing_task
        .id
        .ok_or_else(|| ApiError::Internal("Loaded task has no id".to_string()))?;

    mapper::apply_update(&payload, &mut existing_task);
    match deployment.tasks().update(id, existing_task).await? {
        TaskLookup::Found(task) => Ok(ResponseJson(mapper::to_dto(task))),
        TaskLookup::NotFound(id) => {
            // removed by a concurrent request after the existence check
            tracing::warn!(task_id = id, "Task was gone when updating");
            Err(ApiError::NotFound)
        }
    }
}

pub async fn delete_task(
    Extension(task): Extension<Task>,
    State(deployment): State<DeploymentImpl>,
) -> Result<StatusCode, ApiError> {
    let id = task
        .id
        .ok_or_else(|| ApiError::Internal("Loaded task has no id".to_string()))?;

    let rows = deployment.tasks().delete_by_id(id).await?;
    if rows == 0 {
        // removed by a concurrent request after the existence check
        tracing::warn!(task_id = id, "Task was already gone when deleting");
        return Err(ApiError::NotFound);
    }

    Ok(StatusCode::NO_CONTENT)
}

use axum::{Router, middleware::from_fn_with_state, routing::get};

use super::{create_task, delete_task, get_task, get_tasks, update_task};
use crate::{DeploymentImpl, middleware::load_task_middleware};

pub fn router(deployment: &DeploymentImpl) -> Router<DeploymentImpl> {
    // every route under an id loads the task first and answers 404 itself
    let task_id_router = Router::new()
        .route("/", get(get_task).put(update_task).delete(delete_task))
        .layer(from_fn_with_state(
            deployment.clone(),
            load_task_middleware::<DeploymentImpl>,
        ));

    let inner = Router::new()
        .route("/", get(get_tasks).post(create_task))
        .nest("/{task_id}", task_id_router);

    Router::new().nest("/tasks", inner)
}

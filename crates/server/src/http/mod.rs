use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::{DeploymentImpl, routes};

pub fn router(deployment: DeploymentImpl) -> Router {
    Router::new()
        .route("/health", get(routes::health::health_check))
        .merge(routes::tasks::router(&deployment))
        .layer(TraceLayer::new_for_http())
        .with_state(deployment)
}

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::middleware::rate_limit::{limit_job_create, limit_public_read};
use crate::state::AppState;

use super::controller::{create_job, delete_job, get_job, list_jobs, update_job};

pub fn init_jobs_router(state: AppState) -> Router<AppState> {
    let create_limited = Router::new()
        .route("/", post(create_job))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            limit_job_create,
        ));

    let public = Router::new()
        .route("/", get(list_jobs))
        .route("/{job_id}", get(get_job))
        .route_layer(middleware::from_fn_with_state(state, limit_public_read));

    Router::new()
        .route("/{job_id}", put(update_job).delete(delete_job))
        .merge(create_limited)
        .merge(public)
}

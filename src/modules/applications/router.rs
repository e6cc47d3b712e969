use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::middleware::rate_limit::limit_job_apply;
use crate::state::AppState;

use super::controller::{
    apply, employer_applications, get_application, my_applications, update_status,
};

pub fn init_applications_router(state: AppState) -> Router<AppState> {
    let apply_limited = Router::new()
        .route("/jobs/{job_id}/apply", post(apply))
        .route_layer(middleware::from_fn_with_state(state, limit_job_apply));

    Router::new()
        .route("/my-applications", get(my_applications))
        .route("/employer/applications", get(employer_applications))
        .route("/{application_id}", get(get_application))
        .route("/{application_id}/status", put(update_status))
        .merge(apply_limited)
}

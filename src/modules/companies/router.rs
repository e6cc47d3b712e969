use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::middleware::rate_limit::{limit_company_create, limit_public_read};
use crate::state::AppState;

use super::controller::{
    create_company, delete_company, get_company, list_companies, my_companies, update_company,
};

pub fn init_companies_router(state: AppState) -> Router<AppState> {
    let create_limited = Router::new()
        .route("/", post(create_company))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            limit_company_create,
        ));

    let public = Router::new()
        .route("/", get(list_companies))
        .route("/{company_id}", get(get_company))
        .route_layer(middleware::from_fn_with_state(state, limit_public_read));

    Router::new()
        .route("/my-companies", get(my_companies))
        .route("/{company_id}", put(update_company).delete(delete_company))
        .merge(create_limited)
        .merge(public)
}

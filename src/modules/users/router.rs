use axum::{Router, middleware, routing::get};

use crate::middleware::rate_limit::limit_public_read;
use crate::modules::users::controller::{get_my_profile, get_user_profile, update_my_profile};
use crate::state::AppState;

pub fn init_users_router(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/profile/{user_id}", get(get_user_profile))
        .route_layer(middleware::from_fn_with_state(state, limit_public_read));

    Router::new()
        .route("/profile", get(get_my_profile).put(update_my_profile))
        .merge(public)
}

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::state::AppState;

use super::controller::{
    approve_employer, change_role, delete_user, get_user, list_users, pending_employers,
    reject_employer, set_status,
};

pub fn init_admin_router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/{user_id}", get(get_user).delete(delete_user))
        .route("/users/{user_id}/role", put(change_role))
        .route("/users/{user_id}/status", put(set_status))
        .route("/pending-employers", get(pending_employers))
        .route("/approve-employer/{user_id}", post(approve_employer))
        .route("/reject-employer/{user_id}", delete(reject_employer))
}

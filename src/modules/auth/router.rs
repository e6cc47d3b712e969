use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::middleware::rate_limit::{limit_login, limit_password_reset, limit_register};
use crate::state::AppState;

use super::controller::{change_password, login, logout, logout_all, me, refresh, register};

pub fn init_auth_router(state: AppState) -> Router<AppState> {
    // Login and refresh share one limit class: both mint token pairs.
    let login_limited = Router::new()
        .route("/login", post(login))
        .route("/refresh", post(refresh))
        .route_layer(middleware::from_fn_with_state(state.clone(), limit_login));

    let register_limited = Router::new()
        .route("/register", post(register))
        .route_layer(middleware::from_fn_with_state(state.clone(), limit_register));

    let password_limited = Router::new()
        .route("/change-password", post(change_password))
        .route_layer(middleware::from_fn_with_state(state, limit_password_reset));

    Router::new()
        .route("/logout", post(logout))
        .route("/logout-all", post(logout_all))
        .route("/me", get(me))
        .merge(login_limited)
        .merge(register_limited)
        .merge(password_limited)
}

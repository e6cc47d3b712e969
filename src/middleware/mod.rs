//! Middleware modules for request processing.
//!
//! # Modules
//!
//! - [`auth`]: token extraction, identity resolution and the `CurrentUser` /
//!   role extractors
//! - [`rate_limit`]: fixed-window request limiting by route class
//!
//! # Authentication Flow
//!
//! 1. Client sends a request with `Authorization: Bearer <token>` or the
//!    HttpOnly `access_token` cookie
//! 2. The rate-limit layer (where applied) resolves the identity once and
//!    keys its counters by user, falling back to the client IP
//! 3. `CurrentUser` verifies the token, resolves the identity through the
//!    cache and runs the active check
//! 4. Role extractors (`AdminUser`, `EmployerUser`, `SeekerUser`) narrow
//!    access by role; admins pass every gate
//!
//! # Example
//!
//! ```ignore
//! use crate::middleware::auth::{CurrentUser, EmployerUser};
//!
//! // Any active authenticated user
//! async fn me(CurrentUser(identity): CurrentUser) -> impl IntoResponse {
//!     // ...
//! }
//!
//! // Employers and admins only
//! async fn post_job(EmployerUser(identity): EmployerUser) -> impl IntoResponse {
//!     // ...
//! }
//! ```

pub mod auth;
pub mod rate_limit;

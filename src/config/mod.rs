//! Configuration modules for the Jobline API.
//!
//! Each submodule owns one aspect of configuration, loaded from environment
//! variables with sensible defaults for local development.
//!
//! # Modules
//!
//! - [`cache`]: identity cache TTL
//! - [`cookie`]: refresh token cookie attributes
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`database`]: PostgreSQL connection pool initialization
//! - [`jwt`]: token signing secret and lifetimes
//! - [`rate_limit`]: per-route-class request limits

pub mod cache;
pub mod cookie;
pub mod cors;
pub mod database;
pub mod jwt;
pub mod rate_limit;

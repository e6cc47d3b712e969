//! Utility modules for the Jobline API.
//!
//! - [`errors`]: application error taxonomy and response envelope
//! - [`jwt`]: typed token creation and verification
//! - [`pagination`]: request pagination utilities
//! - [`password`]: password hashing, verification and strength checks
//! - [`serde`]: tolerant query-string deserializers
//! - [`token_hash`]: refresh token digests

pub mod errors;
pub mod jwt;
pub mod pagination;
pub mod password;
pub mod serde;
pub mod token_hash;

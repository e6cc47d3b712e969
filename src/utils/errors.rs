use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;
use utoipa::ToSchema;

/// Error envelope as rendered on the wire, for OpenAPI documentation.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorDetail {
    /// Stable machine-readable code, e.g. `INVALID_TOKEN`.
    pub code: String,
    pub message: String,
    /// Extra context for some errors, e.g. `retry_after_seconds` on 429s.
    pub details: Option<Value>,
}

/// Application error taxonomy.
///
/// Every variant maps to a stable machine-readable code so clients can branch
/// on failures without parsing messages. Rendered as
/// `{"error": {"code", "message", "details"}}`.
#[derive(Debug, Error)]
pub enum AppError {
    /// No credential was presented on a route that requires one.
    #[error("Not authenticated")]
    NotAuthenticated,

    /// The presented token is malformed, tampered with, or expired.
    #[error("Could not validate credentials")]
    InvalidToken,

    /// The token is valid but of the wrong type for this operation.
    #[error("Invalid token type")]
    WrongTokenType,

    /// Login failed. Deliberately the same for unknown email and bad password.
    #[error("Incorrect email or password")]
    InvalidCredentials,

    /// The token subject no longer exists.
    #[error("User not found")]
    UserNotFound,

    /// The account exists but has been deactivated.
    #[error("User account is disabled")]
    AccountDisabled,

    #[error("{0}")]
    Forbidden(String),

    /// The refresh token is unknown, expired, revoked, or already rotated.
    #[error("Invalid or expired refresh token")]
    RefreshTokenInvalid,

    #[error("Rate limit exceeded, try again in {retry_after_seconds} seconds")]
    RateLimitExceeded { retry_after_seconds: u64 },

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Validation(String),

    #[error("Service temporarily unavailable")]
    StoreUnavailable(#[from] sqlx::Error),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        Self::Internal(err.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotAuthenticated
            | Self::InvalidToken
            | Self::WrongTokenType
            | Self::InvalidCredentials
            | Self::UserNotFound
            | Self::RefreshTokenInvalid => StatusCode::UNAUTHORIZED,
            Self::AccountDisabled | Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::RateLimitExceeded { .. } => StatusCode::TOO_MANY_REQUESTS,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::NotAuthenticated => "NOT_AUTHENTICATED",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::WrongTokenType => "INVALID_TOKEN_TYPE",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::AccountDisabled => "ACCOUNT_DISABLED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::RefreshTokenInvalid => "REFRESH_TOKEN_INVALID",
            Self::RateLimitExceeded { .. } => "RATE_LIMIT_EXCEEDED",
            Self::NotFound(_) => "NOT_FOUND",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::StoreUnavailable(_) => "STORE_UNAVAILABLE",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    fn details(&self) -> Value {
        match self {
            Self::RateLimitExceeded {
                retry_after_seconds,
            } => json!({ "retry_after_seconds": retry_after_seconds }),
            _ => Value::Null,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            Self::StoreUnavailable(err) => {
                tracing::error!(error = %err, "database error");
            }
            Self::Internal(err) => {
                tracing::error!(error = ?err, "internal error");
            }
            _ => {}
        }

        let body = Json(json!({
            "error": {
                "code": self.code(),
                "message": self.to_string(),
                "details": self.details(),
            }
        }));

        let mut response = (self.status(), body).into_response();

        if let Self::RateLimitExceeded {
            retry_after_seconds,
        } = self
        {
            if let Ok(value) = retry_after_seconds.to_string().parse() {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
        }

        response
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}

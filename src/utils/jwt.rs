use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use crate::config::jwt::JwtConfig;
use crate::modules::auth::model::{Claims, TokenType};
use crate::modules::users::model::UserRole;
use crate::utils::errors::AppError;

pub fn create_access_token(
    user_id: Uuid,
    role: UserRole,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    create_token(
        user_id,
        role,
        TokenType::Access,
        jwt_config.access_token_expiry,
        None,
        jwt_config,
    )
}

/// Refresh tokens carry a random `jti` so two tokens minted for the same user
/// within the same second still hash to distinct store entries.
pub fn create_refresh_token(
    user_id: Uuid,
    role: UserRole,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    create_token(
        user_id,
        role,
        TokenType::Refresh,
        jwt_config.refresh_token_expiry,
        Some(Uuid::new_v4().to_string()),
        jwt_config,
    )
}

fn create_token(
    user_id: Uuid,
    role: UserRole,
    token_type: TokenType,
    expiry_seconds: i64,
    jti: Option<String>,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp();

    let claims = Claims {
        sub: user_id.to_string(),
        role,
        token_type,
        iat: now,
        exp: now + expiry_seconds,
        jti,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(AppError::internal)
}

/// Decodes and validates a token, then checks it is of the expected type.
///
/// Signature, structure and expiry failures all collapse into
/// [`AppError::InvalidToken`]. A well-formed token of the other type is the
/// distinct [`AppError::WrongTokenType`].
pub fn verify_token(
    token: &str,
    expected: TokenType,
    jwt_config: &JwtConfig,
) -> Result<Claims, AppError> {
    let mut validation = Validation::default();
    // No clock leeway: expiry means expiry.
    validation.leeway = 0;

    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::InvalidToken)?;

    // exp is exclusive: a token expiring at the validation instant is
    // already invalid.
    if claims.exp <= Utc::now().timestamp() {
        return Err(AppError::InvalidToken);
    }

    if claims.token_type != expected {
        return Err(AppError::WrongTokenType);
    }

    Ok(claims)
}

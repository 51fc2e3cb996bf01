use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::AppState;

/// Session token claims as issued by the account service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Owner (user) ID
    pub email: String,
    pub exp: usize,
    pub iat: usize,
}

/// The authenticated caller. Handlers pass it explicitly into every
/// service call; nothing reads it from ambient state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: Uuid,
    pub email: String,
}

impl Principal {
    pub fn from_token(token: &str, secret: &str) -> Result<Self, AppError> {
        let claims = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| {
            tracing::debug!("rejected bearer token: {}", e);
            AppError::Unauthorized
        })?
        .claims;

        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| AppError::Unauthorized)?;

        Ok(Self {
            user_id,
            email: claims.email,
        })
    }
}

pub async fn require_auth(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let TypedHeader(Authorization(bearer)) = bearer.ok_or(AppError::Unauthorized)?;

    let principal = Principal::from_token(bearer.token(), &state.config.jwt.secret)?;
    request.extensions_mut().insert(principal);

    Ok(next.run(request).await)
}

//! Caller identity: resolves an opaque bearer token to an opaque user id.
//!
//! Token issuance lives elsewhere. Nothing here inspects the token's contents.

use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;
use axum::http::{header, HeaderMap};
use sqlx::PgPool;

use crate::errors::AppError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CallerId(pub String);

impl CallerId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CallerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// `Ok(None)` for unknown or expired tokens.
    async fn resolve(&self, token: &str) -> Result<Option<CallerId>, AppError>;
}

/// Looks tokens up in the `sessions` table.
pub struct PgSessionResolver(pub PgPool);

#[async_trait]
impl IdentityResolver for PgSessionResolver {
    async fn resolve(&self, token: &str) -> Result<Option<CallerId>, AppError> {
        let user_id: Option<String> = sqlx::query_scalar(
            "SELECT user_id FROM sessions WHERE token = $1 AND expires_at > now()",
        )
        .bind(token)
        .fetch_optional(&self.0)
        .await?;

        Ok(user_id.map(CallerId))
    }
}

/// Fixed token → user table, for local development and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticTokenResolver {
    tokens: HashMap<String, CallerId>,
}

impl StaticTokenResolver {
    pub fn new(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            tokens: pairs
                .into_iter()
                .map(|(token, user)| (token, CallerId(user)))
                .collect(),
        }
    }
}

#[async_trait]
impl IdentityResolver for StaticTokenResolver {
    async fn resolve(&self, token: &str) -> Result<Option<CallerId>, AppError> {
        Ok(self.tokens.get(token).cloned())
    }
}

/// Extracts `Authorization: Bearer <token>` and resolves it, or fails with 401.
pub async fn require_caller(
    headers: &HeaderMap,
    resolver: &dyn IdentityResolver,
) -> Result<CallerId, AppError> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(AppError::Unauthorized)?;

    resolver.resolve(token).await?.ok_or(AppError::Unauthorized)
}

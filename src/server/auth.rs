//! Bearer API key authentication.

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use std::collections::HashMap;
use uuid::Uuid;

use super::response::ApiResponse;
use super::AppState;
use crate::config::ApiKeyEntry;

/// Authenticated user info, added to request extensions after auth
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: Uuid,
}

/// API key store - maps key -> AuthUser
#[derive(Debug, Clone, Default)]
pub struct ApiKeyStore {
    keys: HashMap<String, AuthUser>,
}

impl ApiKeyStore {
    /// Build the store from configured key entries
    pub fn from_entries(entries: &[ApiKeyEntry]) -> Self {
        let keys: HashMap<_, _> = entries
            .iter()
            .map(|entry| {
                (
                    entry.key.clone(),
                    AuthUser {
                        user_id: entry.user_id,
                    },
                )
            })
            .collect();

        if keys.is_empty() {
            tracing::warn!("No API keys loaded - all authenticated requests will fail");
        } else {
            tracing::info!("Loaded {} API key(s)", keys.len());
        }

        Self { keys }
    }

    /// Validate an API key and return the associated user
    pub fn validate(&self, key: &str) -> Option<AuthUser> {
        self.keys.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(ApiResponse::<()>::failure(message)),
    )
        .into_response()
}

/// Authentication middleware
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let api_key = match auth_header {
        Some(h) => match h.strip_prefix("Bearer ") {
            Some(key) => key.trim(),
            None => return unauthorized("Authorization header must use Bearer scheme"),
        },
        None => return unauthorized("Authorization header required"),
    };

    match state.api_keys.validate(api_key) {
        Some(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        None => {
            tracing::debug!("Rejected request with unknown API key");
            unauthorized("Invalid API key")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_known_and_unknown_keys() {
        let user_id = Uuid::new_v4();
        let store = ApiKeyStore::from_entries(&[ApiKeyEntry {
            key: "secret".to_string(),
            user_id,
        }]);

        assert_eq!(store.len(), 1);
        assert_eq!(store.validate("secret"), Some(AuthUser { user_id }));
        assert!(store.validate("Secret").is_none());
        assert!(store.validate("").is_none());
    }

    #[test]
    fn test_empty_store() {
        let store = ApiKeyStore::from_entries(&[]);
        assert!(store.is_empty());
    }
}

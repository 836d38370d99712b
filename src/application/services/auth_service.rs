//! Authentication service resolving API tokens to creators.

use std::sync::Arc;

use crate::domain::entities::Creator;
use crate::domain::repositories::TokenRepository;
use crate::error::AppError;
use crate::utils::token::hash_token;
use serde_json::json;

/// Service for authenticating requests via Bearer tokens or the session cookie.
///
/// Tokens are hashed with HMAC-SHA256 (keyed by `signing_secret`) before lookup.
/// The admin CLI hashes with the same function when it issues tokens.
pub struct AuthService {
    repository: Arc<dyn TokenRepository>,
    signing_secret: String,
}

impl AuthService {
    /// Creates a new authentication service.
    ///
    /// # Arguments
    ///
    /// - `repository` - token repository for DB operations
    /// - `signing_secret` - HMAC key; must match the value used when tokens were created
    pub fn new(repository: Arc<dyn TokenRepository>, signing_secret: String) -> Self {
        Self {
            repository,
            signing_secret,
        }
    }

    /// Resolves a raw token to the creator it was issued for.
    ///
    /// On success, updates the token's `last_used_at` timestamp. A failure to
    /// record usage does not fail the request.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is unknown or revoked.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn authenticate(&self, token: &str) -> Result<Creator, AppError> {
        let token_hash = hash_token(&self.signing_secret, token);

        let creator = self
            .repository
            .find_creator_by_token(&token_hash)
            .await?
            .ok_or_else(|| {
                AppError::unauthorized(
                    "Unauthorized",
                    json!({"reason": "Invalid or revoked token"}),
                )
            })?;

        if let Err(e) = self.repository.update_last_used(&token_hash).await {
            tracing::warn!(error = %e, "Failed to record token usage");
        }

        Ok(creator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Role;
    use crate::domain::repositories::MockTokenRepository;

    fn test_secret() -> String {
        "test-signing-secret".to_string()
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let mut mock_repo = MockTokenRepository::new();

        let token = "valid-token";
        let expected_hash = hash_token(&test_secret(), token);

        mock_repo
            .expect_find_creator_by_token()
            .withf(move |hash| hash == expected_hash)
            .times(1)
            .returning(|_| Ok(Some(Creator::new(3, "a@example.com", "Alice", Role::User))));

        mock_repo
            .expect_update_last_used()
            .times(1)
            .returning(|_| Ok(()));

        let service = AuthService::new(Arc::new(mock_repo), test_secret());

        let creator = service.authenticate(token).await.unwrap();

        assert_eq!(creator.id, 3);
        assert_eq!(creator.role, Role::User);
    }

    #[tokio::test]
    async fn test_authenticate_invalid_token() {
        let mut mock_repo = MockTokenRepository::new();

        mock_repo
            .expect_find_creator_by_token()
            .times(1)
            .returning(|_| Ok(None));
        mock_repo.expect_update_last_used().times(0);

        let service = AuthService::new(Arc::new(mock_repo), test_secret());

        let result = service.authenticate("invalid-token").await;

        assert!(matches!(result.unwrap_err(), AppError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_usage_tracking_failure_does_not_reject() {
        let mut mock_repo = MockTokenRepository::new();

        mock_repo
            .expect_find_creator_by_token()
            .returning(|_| Ok(Some(Creator::new(1, "a@example.com", "Alice", Role::Admin))));
        mock_repo
            .expect_update_last_used()
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        let service = AuthService::new(Arc::new(mock_repo), test_secret());

        assert!(service.authenticate("token").await.is_ok());
    }

    #[tokio::test]
    async fn test_repository_error_propagates() {
        let mut mock_repo = MockTokenRepository::new();

        mock_repo
            .expect_find_creator_by_token()
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        let service = AuthService::new(Arc::new(mock_repo), test_secret());

        assert!(matches!(
            service.authenticate("token").await,
            Err(AppError::Internal { .. })
        ));
    }
}

use std::sync::Arc;

use argon2::password_hash::{rand_core, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use tokio_util::sync::CancellationToken;

use crate::errors::{AuthError, CoreError};
use crate::models::Credential;
use crate::repositories::ItemRepository;

/// Verified against when the user does not exist, so both failure paths
/// cost one hash computation.
const DUMMY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$zk5JmuovvG7B6vyGGmLxDQ$qoqCpKkqrgoVjeTGa5ewrqFpuPUisTCDnEiPz6Dh/oc";

#[derive(Debug, Clone)]
pub struct Argon2Hash(Argon2<'static>);

#[derive(Clone)]
pub struct CredentialService {
    hasher: Arc<Argon2Hash>,
    items: Arc<ItemRepository>,
    table: String,
}

impl CredentialService {
    pub fn new(items: Arc<ItemRepository>, table: impl Into<String>) -> Self {
        let hash = Argon2Hash(Argon2::default());

        Self {
            hasher: Arc::new(hash),
            items,
            table: table.into(),
        }
    }

    /// Runs on the blocking pool.
    pub async fn hash(&self, password: &str) -> Result<String, AuthError> {
        let hasher = self.hasher.clone();
        let password = password.to_string();

        tokio::task::spawn_blocking(move || {
            let hash_salt = SaltString::generate(&mut rand_core::OsRng);
            hasher
                .0
                .hash_password(password.as_bytes(), &hash_salt)
                .map(|hash| hash.to_string())
                .map_err(|e| AuthError::HashingFailure(e.to_string()))
        })
        .await
        .map_err(|e| AuthError::HashingFailure(e.to_string()))?
    }

    /// Constant time comparison on the blocking pool; a malformed stored
    /// hash never matches.
    pub async fn verify(&self, password_hash: &str, password: &str) -> Result<bool, AuthError> {
        let hasher = self.hasher.clone();
        let password_hash = password_hash.to_string();
        let password = password.to_string();

        tokio::task::spawn_blocking(move || match PasswordHash::new(&password_hash) {
            Ok(parsed_hash) => hasher
                .0
                .verify_password(password.as_bytes(), &parsed_hash)
                .is_ok(),
            Err(e) => {
                tracing::warn!(error = %e, "stored password hash is malformed");
                false
            }
        })
        .await
        .map_err(|e| AuthError::HashingFailure(e.to_string()))
    }

    /// Hashes `password` and overwrites any record stored for `username`.
    pub async fn set_credentials(
        &self,
        username: &str,
        password: &str,
        cancel: &CancellationToken,
    ) -> Result<(), CoreError> {
        tracing::debug!(user = username, "storing credentials for user");

        let credential = Credential {
            username: username.to_string(),
            password_hash: self.hash(password).await?,
        };

        self.items
            .put(&self.table, username, &credential, cancel)
            .await?;

        tracing::debug!(user = username, "successfully stored credentials for user");

        Ok(())
    }

    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
        cancel: &CancellationToken,
    ) -> Result<(), CoreError> {
        tracing::debug!(user = username, "getting credentials for user");

        let credential: Option<Credential> = self.items.get(&self.table, username, cancel).await?;

        let Some(credential) = credential else {
            let _ = self.verify(DUMMY_HASH, password).await?;
            tracing::debug!(user = username, "authentication failed: user not found");
            return Err(AuthError::AuthenticationFailure.into());
        };

        if !self.verify(&credential.password_hash, password).await? {
            tracing::debug!(user = username, "authentication failed: password mismatch");
            return Err(AuthError::AuthenticationFailure.into());
        }

        tracing::debug!(user = username, "successfully authenticated user");

        Ok(())
    }

    /// Removing an unknown user succeeds.
    pub async fn delete_user(
        &self,
        username: &str,
        cancel: &CancellationToken,
    ) -> Result<(), CoreError> {
        tracing::debug!(user = username, "deleting user");

        self.items.delete(&self.table, username, cancel).await?;

        tracing::debug!(user = username, "successfully deleted user");

        Ok(())
    }
}

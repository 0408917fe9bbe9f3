use std::fmt;

use serde::{Deserialize, Serialize};

/// Username and password pair of the administrative account
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Clone, Serialize, Deserialize)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for CredentialsRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialsRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Signed bearer token
    pub token: String,
    /// Expiry as a unix timestamp in seconds
    pub expires_at: i64,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimsResponse {
    /// Username the token was issued to
    pub subject: String,
    /// Issue time as a unix timestamp in seconds
    pub issued_at: i64,
    /// Expiry as a unix timestamp in seconds
    pub expires_at: i64,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub message: String,
    pub user: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_debug_hides_password() {
        let credentials = CredentialsRequest {
            username: "admin".to_string(),
            password: "hunter2".to_string(),
        };

        let printed = format!("{credentials:?}");

        assert!(printed.contains("admin"));
        assert!(!printed.contains("hunter2"));
    }
}

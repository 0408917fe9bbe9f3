use std::time::Duration;

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use smarthome_api::models::{ClaimsResponse, TokenResponse};
use time::OffsetDateTime;

use crate::configs::Auth;
use crate::errors::AuthError;

#[derive(Debug, Clone)]
pub struct Token {
    pub token: String,
    pub exp: i64,
}

impl From<Token> for TokenResponse {
    fn from(token: Token) -> Self {
        Self {
            token: token.token,
            expires_at: token.exp,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

impl From<TokenClaims> for ClaimsResponse {
    fn from(claims: TokenClaims) -> Self {
        Self {
            subject: claims.sub,
            issued_at: claims.iat,
            expires_at: claims.exp,
        }
    }
}

/// Issues and validates HS256 bearer tokens. Nothing is persisted, so a
/// token stays valid until it expires.
#[derive(Clone)]
pub struct TokenService {
    expiration: Duration,
    secret: String,
}

impl TokenService {
    pub fn new(auth: &Auth) -> Self {
        Self {
            expiration: Duration::from_secs(auth.expiration),
            secret: auth.secret.clone(),
        }
    }

    pub fn issue(&self, subject: &str, ttl: Duration) -> Result<Token, AuthError> {
        self.issue_at(subject, ttl, now())
    }

    pub fn issue_default(&self, subject: &str) -> Result<Token, AuthError> {
        self.issue(subject, self.expiration)
    }

    /// Re-issues a token for the subject of already validated claims.
    pub fn refresh(&self, claims: &TokenClaims) -> Result<Token, AuthError> {
        self.issue_default(&claims.sub)
    }

    pub fn issue_at(&self, subject: &str, ttl: Duration, iat: i64) -> Result<Token, AuthError> {
        if self.secret.is_empty() {
            return Err(AuthError::SigningFailure(String::from("signing secret is empty")));
        }

        if ttl.is_zero() {
            return Err(AuthError::SigningFailure(String::from("token lifetime is zero")));
        }

        // Whole seconds, rounded up so a sub-second lifetime is still valid at issue time
        let ttl = ttl
            .as_secs()
            .checked_add(u64::from(ttl.subsec_nanos() > 0))
            .and_then(|ttl| i64::try_from(ttl).ok())
            .ok_or_else(|| AuthError::SigningFailure(String::from("token lifetime out of range")))?;
        let exp = iat.saturating_add(ttl);

        let claims = TokenClaims {
            sub: subject.to_string(),
            iat,
            exp,
        };

        let encoding_key = EncodingKey::from_secret(self.secret.as_ref());

        let token = encode(&Header::new(Algorithm::HS256), &claims, &encoding_key)
            .map_err(|e| AuthError::SigningFailure(e.to_string()))?;

        tracing::debug!(subject, exp, "issued token");

        Ok(Token { token, exp })
    }

    pub fn validate(&self, token: &str) -> Result<TokenClaims, AuthError> {
        self.validate_at(token, now())
    }

    /// Checks the signature, then requires `exp > now` with no leeway.
    pub fn validate_at(&self, token: &str, now: i64) -> Result<TokenClaims, AuthError> {
        if self.secret.is_empty() {
            return Err(AuthError::InvalidToken);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let claims = decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_ref()),
            &validation,
        )
        .map_err(|e| {
            tracing::debug!(error = %e, "rejected token");
            AuthError::InvalidToken
        })?
        .claims;

        if claims.exp <= now {
            tracing::debug!(subject = %claims.sub, exp = claims.exp, "rejected expired token");
            return Err(AuthError::InvalidToken);
        }

        Ok(claims)
    }
}

fn now() -> i64 {
    OffsetDateTime::now_utc().unix_timestamp()
}

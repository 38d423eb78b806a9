use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// Signed session payload carried in the session cookie.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,
    pub name: String,
    pub iat: i64,
    pub exp: i64,
}

/// Mints and verifies session tokens (HS256).
pub struct Sessions {
    secret: String,
    ttl: Duration,
    fresh_window: Duration,
}

impl Sessions {
    pub fn new(secret: impl Into<String>, ttl: Duration, fresh_window: Duration) -> Self {
        Self {
            secret: secret.into(),
            ttl,
            fresh_window,
        }
    }

    pub fn issue(&self, user_id: i64, name: &str) -> anyhow::Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            name: name.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )?;

        Ok(token)
    }

    /// Invalid, tampered, or expired tokens all read as "no session".
    pub fn verify(&self, token: &str) -> Option<Claims> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .ok()
    }

    /// A session is fresh while its issue time is within the configured
    /// window. Stale sessions stay logged in but cannot author posts.
    pub fn is_fresh(&self, claims: &Claims) -> bool {
        Utc::now().timestamp() - claims.iat <= self.fresh_window.num_seconds()
    }
}

/// Argon2id hashing behind a constructed service rather than a module-level
/// global.
#[derive(Default)]
pub struct Passwords {
    argon2: Argon2<'static>,
}

impl Passwords {
    pub fn hash(&self, password: &str) -> anyhow::Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| anyhow::anyhow!("password hashing failed: {e}"))?;
        Ok(hash.to_string())
    }

    /// `Ok(false)` only for a clean mismatch; a corrupt stored hash or any
    /// other verifier failure propagates as an error.
    pub fn verify(&self, stored: &str, password: &str) -> anyhow::Result<bool> {
        let parsed =
            PasswordHash::new(stored).map_err(|e| anyhow::anyhow!("corrupt password hash: {e}"))?;

        match self.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(anyhow::anyhow!("password verification failed: {e}")),
        }
    }
}

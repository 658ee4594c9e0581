use crate::config::AuthConfig;
use crate::domain::auth::{Claims, Password};
use crate::domain::user::NewUser;
use crate::error::{AppError, Result};
use crate::storage::UserStore;
use opentelemetry::{global, metrics::Counter};
use std::sync::Arc;

#[derive(Clone, Debug)]
struct Metrics {
    register_total: Counter<u64>,
    login_total: Counter<u64>,
}

impl Metrics {
    fn new() -> Self {
        let meter = global::meter("courier-server");
        Self {
            register_total: meter
                .u64_counter("courier_auth_register_total")
                .with_description("Total number of successful registrations")
                .build(),
            login_total: meter
                .u64_counter("courier_auth_login_total")
                .with_description("Total number of successful login attempts")
                .build(),
        }
    }
}

#[derive(Debug)]
pub struct Registration {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
}

#[derive(Clone, Debug)]
pub struct AuthService {
    config: AuthConfig,
    users: Arc<dyn UserStore>,
    metrics: Metrics,
}

impl AuthService {
    #[must_use]
    pub fn new(config: AuthConfig, users: Arc<dyn UserStore>) -> Self {
        Self { config, users, metrics: Metrics::new() }
    }

    /// Creates a user and returns a signed access token for them.
    ///
    /// # Errors
    /// Returns `AppError::BadRequest` if the username is empty or padded with whitespace,
    /// or if the password is empty.
    /// Returns `AppError::Conflict` if the username is taken.
    #[tracing::instrument(err(level = "warn"), skip(self, registration), fields(username = %registration.username))]
    pub async fn register(&self, registration: Registration) -> Result<String> {
        if registration.username.trim().is_empty() {
            return Err(AppError::BadRequest("Username must not be empty".into()));
        }
        if registration.username.trim() != registration.username {
            return Err(AppError::BadRequest("Username must not start or end with whitespace".into()));
        }
        if registration.password.is_empty() {
            return Err(AppError::BadRequest("Password must not be empty".into()));
        }

        let password_hash = Self::hash_password(&registration.password).await?;
        let user = self
            .users
            .create(NewUser {
                username: registration.username,
                password_hash,
                first_name: registration.first_name,
                last_name: registration.last_name,
                phone: registration.phone,
            })
            .await?;

        self.metrics.register_total.add(1, &[]);
        self.issue_token(&user.username)
    }

    /// Checks credentials and returns a signed access token.
    ///
    /// # Errors
    /// Returns `AppError::Unauthorized` if the user does not exist or the password is wrong.
    #[tracing::instrument(err(level = "warn"), skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> Result<String> {
        let Some(user) = self.users.find_by_username(username).await? else {
            tracing::warn!("Login failed: user not found");
            return Err(AppError::Unauthorized);
        };

        if !Self::verify_password(password, &user.password_hash).await? {
            tracing::warn!("Login failed: invalid password");
            return Err(AppError::Unauthorized);
        }

        self.metrics.login_total.add(1, &[]);
        self.issue_token(&user.username)
    }

    /// Resolves the username a token was issued to.
    ///
    /// # Errors
    /// Returns `AppError::Unauthorized` if the token is invalid or expired.
    pub fn verify_token(&self, token: &str) -> Result<String> {
        Claims::decode(token, &self.config.jwt_secret).map(|claims| claims.sub)
    }

    // Argon2 is CPU-bound; keep it off the async workers.
    #[tracing::instrument(err, skip(password))]
    async fn hash_password(password: &str) -> Result<String> {
        let password = password.to_string();
        tokio::task::spawn_blocking(move || Password::hash(&password)).await.map_err(|_| AppError::Internal)?
    }

    #[tracing::instrument(err, skip(password, password_hash))]
    async fn verify_password(password: &str, password_hash: &str) -> Result<bool> {
        let password = password.to_string();
        let password_hash = password_hash.to_string();
        tokio::task::spawn_blocking(move || Password::verify(&password, &password_hash))
            .await
            .map_err(|_| AppError::Internal)?
    }

    fn issue_token(&self, username: &str) -> Result<String> {
        Claims::new(username, self.config.access_token_ttl_secs).encode(&self.config.jwt_secret)
    }
}

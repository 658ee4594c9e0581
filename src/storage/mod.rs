use crate::config::DatabaseConfig;
use crate::domain::message::{Message, MessageId, NewMessage, ReadReceipt, SentMessage};
use crate::domain::user::{NewUser, User};
use crate::error::Result;
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};

pub mod message_repo;
pub mod records;
pub mod user_repo;

pub type DbPool = Pool<Postgres>;

/// Initializes the database connection pool.
///
/// # Errors
/// Returns `sqlx::Error` if the connection fails.
pub async fn init_pool(config: &DatabaseConfig) -> std::result::Result<DbPool, sqlx::Error> {
    PgPoolOptions::new().max_connections(config.max_connections).connect(&config.url).await
}

/// Persistence for messages.
///
/// Implementations resolve both participants on `get`, assign `id` and
/// `sent_at` on `create`, and must make `mark_read` safe under concurrent
/// calls for the same id: the first successful call fixes `read_at` and
/// later calls return that same value.
#[async_trait]
pub trait MessageStore: Send + Sync + std::fmt::Debug {
    /// # Errors
    /// Returns `AppError::NotFound` if no message has this id.
    async fn get(&self, id: MessageId) -> Result<Message>;

    /// # Errors
    /// Returns `AppError::BadRequest` if the recipient does not exist or is the sender.
    async fn create(&self, message: NewMessage) -> Result<SentMessage>;

    /// # Errors
    /// Returns `AppError::NotFound` if no message has this id.
    async fn mark_read(&self, id: MessageId) -> Result<ReadReceipt>;

    /// Cheap connectivity probe used by the readiness check.
    ///
    /// # Errors
    /// Returns an error if the backing store is unreachable.
    async fn ping(&self) -> Result<()>;
}

/// Persistence for registered users.
#[async_trait]
pub trait UserStore: Send + Sync + std::fmt::Debug {
    /// # Errors
    /// Returns `AppError::Conflict` if the username is taken.
    async fn create(&self, user: NewUser) -> Result<User>;

    /// # Errors
    /// Returns `AppError::Database` on storage failure.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;
}

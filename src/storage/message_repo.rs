use crate::domain::message::{Message, MessageId, NewMessage, ReadReceipt, SentMessage};
use crate::error::{AppError, Result};
use crate::storage::{DbPool, MessageStore, records};
use async_trait::async_trait;

#[derive(Clone, Debug)]
pub struct MessageRepository {
    pool: DbPool,
}

impl MessageRepository {
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageStore for MessageRepository {
    #[tracing::instrument(level = "debug", skip(self), err(level = "debug"))]
    async fn get(&self, id: MessageId) -> Result<Message> {
        let record = sqlx::query_as::<_, records::Message>(
            r"
            SELECT m.id, m.body, m.sent_at, m.read_at,
                   f.username AS from_username, f.first_name AS from_first_name,
                   f.last_name AS from_last_name, f.phone AS from_phone,
                   t.username AS to_username, t.first_name AS to_first_name,
                   t.last_name AS to_last_name, t.phone AS to_phone
            FROM messages AS m
            JOIN users AS f ON f.username = m.from_username
            JOIN users AS t ON t.username = m.to_username
            WHERE m.id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        record.map(Into::into).ok_or_else(|| AppError::NotFound(format!("No such message: {id}")))
    }

    #[tracing::instrument(level = "debug", skip(self, message), err(level = "debug"))]
    async fn create(&self, message: NewMessage) -> Result<SentMessage> {
        if message.from_username == message.to_username {
            return Err(AppError::BadRequest("Cannot send a message to yourself".into()));
        }

        let result = sqlx::query_as::<_, records::SentMessage>(
            r"
            INSERT INTO messages (from_username, to_username, body, sent_at)
            VALUES ($1, $2, $3, NOW())
            RETURNING id, from_username, to_username, body, sent_at
            ",
        )
        .bind(&message.from_username)
        .bind(&message.to_username)
        .bind(&message.body)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(record) => Ok(record.into()),
            Err(sqlx::Error::Database(e)) if e.is_foreign_key_violation() => {
                Err(AppError::BadRequest(format!("No such user: {}", message.to_username)))
            }
            Err(sqlx::Error::Database(e)) if e.is_check_violation() => {
                Err(AppError::BadRequest("Cannot send a message to yourself".into()))
            }
            Err(e) => Err(e.into()),
        }
    }

    #[tracing::instrument(level = "debug", skip(self), err(level = "debug"))]
    async fn mark_read(&self, id: MessageId) -> Result<ReadReceipt> {
        // COALESCE keeps the first read time when two requests race.
        let record = sqlx::query_as::<_, records::ReadReceipt>(
            r"
            UPDATE messages
            SET read_at = COALESCE(read_at, NOW())
            WHERE id = $1
            RETURNING id, read_at
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        record.map(Into::into).ok_or_else(|| AppError::NotFound(format!("No such message: {id}")))
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

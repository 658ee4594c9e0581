use crate::domain::message::{self as domain, MessageId};
use crate::domain::user::UserSummary;
use time::OffsetDateTime;

/// A message row joined with both participants.
#[derive(sqlx::FromRow)]
pub(crate) struct Message {
    pub id: MessageId,
    pub body: String,
    pub sent_at: OffsetDateTime,
    pub read_at: Option<OffsetDateTime>,
    pub from_username: String,
    pub from_first_name: String,
    pub from_last_name: String,
    pub from_phone: String,
    pub to_username: String,
    pub to_first_name: String,
    pub to_last_name: String,
    pub to_phone: String,
}

impl From<Message> for domain::Message {
    fn from(record: Message) -> Self {
        Self {
            id: record.id,
            body: record.body,
            sent_at: record.sent_at,
            read_at: record.read_at,
            from_user: UserSummary {
                username: record.from_username,
                first_name: record.from_first_name,
                last_name: record.from_last_name,
                phone: record.from_phone,
            },
            to_user: UserSummary {
                username: record.to_username,
                first_name: record.to_first_name,
                last_name: record.to_last_name,
                phone: record.to_phone,
            },
        }
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct SentMessage {
    pub id: MessageId,
    pub from_username: String,
    pub to_username: String,
    pub body: String,
    pub sent_at: OffsetDateTime,
}

impl From<SentMessage> for domain::SentMessage {
    fn from(record: SentMessage) -> Self {
        Self {
            id: record.id,
            from_username: record.from_username,
            to_username: record.to_username,
            body: record.body,
            sent_at: record.sent_at,
        }
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct ReadReceipt {
    pub id: MessageId,
    pub read_at: OffsetDateTime,
}

impl From<ReadReceipt> for domain::ReadReceipt {
    fn from(record: ReadReceipt) -> Self {
        Self { id: record.id, read_at: record.read_at }
    }
}

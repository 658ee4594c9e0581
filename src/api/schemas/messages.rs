use crate::domain::message::{self, MessageId};
use crate::domain::user;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Deserialize)]
pub struct SendMessage {
    pub to_username: String,
    pub body: String,
}

/// Every message endpoint wraps its payload as `{"message": ...}`.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub message: T,
}

impl<T> Envelope<T> {
    pub const fn new(message: T) -> Self {
        Self { message }
    }
}

#[derive(Debug, Serialize)]
pub struct UserSummary {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
}

impl From<user::UserSummary> for UserSummary {
    fn from(summary: user::UserSummary) -> Self {
        Self {
            username: summary.username,
            first_name: summary.first_name,
            last_name: summary.last_name,
            phone: summary.phone,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageDetail {
    pub id: MessageId,
    pub body: String,
    #[serde(with = "time::serde::rfc3339")]
    pub sent_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub read_at: Option<OffsetDateTime>,
    pub from_user: UserSummary,
    pub to_user: UserSummary,
}

impl From<message::Message> for MessageDetail {
    fn from(message: message::Message) -> Self {
        Self {
            id: message.id,
            body: message.body,
            sent_at: message.sent_at,
            read_at: message.read_at,
            from_user: message.from_user.into(),
            to_user: message.to_user.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SentMessage {
    pub id: MessageId,
    pub from_username: String,
    pub to_username: String,
    pub body: String,
    #[serde(with = "time::serde::rfc3339")]
    pub sent_at: OffsetDateTime,
}

impl From<message::SentMessage> for SentMessage {
    fn from(sent: message::SentMessage) -> Self {
        Self {
            id: sent.id,
            from_username: sent.from_username,
            to_username: sent.to_username,
            body: sent.body,
            sent_at: sent.sent_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReadReceipt {
    pub id: MessageId,
    #[serde(with = "time::serde::rfc3339")]
    pub read_at: OffsetDateTime,
}

impl From<message::ReadReceipt> for ReadReceipt {
    fn from(receipt: message::ReadReceipt) -> Self {
        Self { id: receipt.id, read_at: receipt.read_at }
    }
}

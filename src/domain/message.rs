use crate::domain::user::UserSummary;
use time::OffsetDateTime;

pub type MessageId = i64;

/// A fully resolved message, with both participants' profiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: MessageId,
    pub body: String,
    pub sent_at: OffsetDateTime,
    pub read_at: Option<OffsetDateTime>,
    pub from_user: UserSummary,
    pub to_user: UserSummary,
}

impl Message {
    /// Whether `username` is the sender or the recipient.
    #[must_use]
    pub fn is_participant(&self, username: &str) -> bool {
        self.from_user.username == username || self.to_user.username == username
    }

    #[must_use]
    pub fn is_recipient(&self, username: &str) -> bool {
        self.to_user.username == username
    }
}

#[derive(Debug, Clone)]
pub struct NewMessage {
    pub from_username: String,
    pub to_username: String,
    pub body: String,
}

/// What the store hands back after a message is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub id: MessageId,
    pub from_username: String,
    pub to_username: String,
    pub body: String,
    pub sent_at: OffsetDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadReceipt {
    pub id: MessageId,
    pub read_at: OffsetDateTime,
}

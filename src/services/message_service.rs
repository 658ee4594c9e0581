use crate::domain::message::{Message, MessageId, NewMessage, ReadReceipt, SentMessage};
use crate::error::{AppError, Result};
use crate::storage::MessageStore;
use opentelemetry::{KeyValue, global, metrics::Counter};
use std::sync::Arc;

#[derive(Clone, Debug)]
struct Metrics {
    sent_total: Counter<u64>,
    read_total: Counter<u64>,
    access_denied_total: Counter<u64>,
}

impl Metrics {
    fn new() -> Self {
        let meter = global::meter("courier-server");
        Self {
            sent_total: meter
                .u64_counter("courier_messages_sent_total")
                .with_description("Total messages successfully sent")
                .build(),
            read_total: meter
                .u64_counter("courier_messages_read_total")
                .with_description("Total successful mark-read requests")
                .build(),
            access_denied_total: meter
                .u64_counter("courier_access_denied_total")
                .with_description("Requests rejected because the caller is not a permitted participant")
                .build(),
        }
    }
}

/// Authorization-checked access to messages.
///
/// Senders and recipients may view a message; only the recipient may mark it read.
#[derive(Clone, Debug)]
pub struct MessageService {
    store: Arc<dyn MessageStore>,
    metrics: Metrics,
}

impl MessageService {
    #[must_use]
    pub fn new(store: Arc<dyn MessageStore>) -> Self {
        Self { store, metrics: Metrics::new() }
    }

    /// Fetches a message on behalf of `username`.
    ///
    /// # Errors
    /// Returns `AppError::Unauthorized` if `username` is neither sender nor recipient.
    /// Returns `AppError::NotFound` if the message does not exist.
    #[tracing::instrument(err(level = "warn"), skip(self))]
    pub async fn get_message(&self, id: MessageId, username: &str) -> Result<Message> {
        let message = self.store.get(id).await?;

        if !message.is_participant(username) {
            self.metrics.access_denied_total.add(1, &[KeyValue::new("operation", "get")]);
            return Err(AppError::Unauthorized);
        }

        Ok(message)
    }

    /// Sends `body` from `username` to `to_username`.
    ///
    /// # Errors
    /// Returns `AppError::BadRequest` if the store rejects the recipient.
    #[tracing::instrument(err(level = "warn"), skip(self, body))]
    pub async fn send_message(&self, username: &str, to_username: String, body: String) -> Result<SentMessage> {
        let sent = self
            .store
            .create(NewMessage { from_username: username.to_string(), to_username, body })
            .await?;

        self.metrics.sent_total.add(1, &[]);
        tracing::debug!(message_id = sent.id, "Message sent");

        Ok(sent)
    }

    /// Marks a message read on behalf of its recipient.
    ///
    /// # Errors
    /// Returns `AppError::NotAuthorized` if `username` is not the recipient.
    /// Returns `AppError::NotFound` if the message does not exist.
    #[tracing::instrument(err(level = "warn"), skip(self))]
    pub async fn mark_read(&self, id: MessageId, username: &str) -> Result<ReadReceipt> {
        let message = self.store.get(id).await?;

        if !message.is_recipient(username) {
            self.metrics.access_denied_total.add(1, &[KeyValue::new("operation", "mark_read")]);
            return Err(AppError::NotAuthorized);
        }

        let receipt = self.store.mark_read(id).await?;
        self.metrics.read_total.add(1, &[]);

        Ok(receipt)
    }
}

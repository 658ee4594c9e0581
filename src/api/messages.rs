use crate::api::AppState;
use crate::api::middleware::AuthUser;
use crate::api::schemas::messages::{Envelope, MessageDetail, ReadReceipt, SendMessage, SentMessage};
use crate::domain::message::MessageId;
use crate::error::{AppError, Result};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    response::IntoResponse,
};

/// Returns a message to its sender or recipient.
///
/// # Errors
/// Returns `AppError::Unauthorized` if the caller is neither participant.
/// Returns `AppError::NotFound` if the message does not exist.
pub async fn get_message(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let id = parse_message_id(&id)?;
    let message = state.message_service.get_message(id, &auth_user.username).await?;
    Ok(Json(Envelope::new(MessageDetail::from(message))))
}

/// Sends a message from the caller.
///
/// # Errors
/// Returns `AppError::BadRequest` if the body is malformed or the recipient is invalid.
pub async fn send_message(
    auth_user: AuthUser,
    State(state): State<AppState>,
    payload: std::result::Result<Json<SendMessage>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(payload) = payload?;
    let sent = state.message_service.send_message(&auth_user.username, payload.to_username, payload.body).await?;
    Ok(Json(Envelope::new(SentMessage::from(sent))))
}

/// Marks a message read. Only the recipient may do this.
///
/// # Errors
/// Returns `AppError::NotAuthorized` if the caller is not the recipient.
/// Returns `AppError::NotFound` if the message does not exist.
pub async fn mark_read(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let id = parse_message_id(&id)?;
    let receipt = state.message_service.mark_read(id, &auth_user.username).await?;
    Ok(Json(Envelope::new(ReadReceipt::from(receipt))))
}

// Ids are serial integers, so anything else names no message.
fn parse_message_id(raw: &str) -> Result<MessageId> {
    raw.parse().map_err(|_| AppError::NotFound(format!("No such message: {raw}")))
}

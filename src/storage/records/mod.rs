pub mod message;
pub mod user;

pub(crate) use message::{Message, ReadReceipt, SentMessage};
pub(crate) use user::User;

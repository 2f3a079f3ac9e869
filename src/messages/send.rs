use std::sync::Arc;

use axum::{Json, debug_handler, extract::State};
use serde::Deserialize;

use crate::Ack;

use super::{DEFAULT_SENDER, MessageStore};

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub to_name: String,
    pub message: String,
    pub from_name: Option<String>,
}

#[debug_handler]
pub async fn send_message(
    State(messages): State<Arc<MessageStore>>,
    Json(SendMessageRequest { to_name, message, from_name }): Json<SendMessageRequest>,
) -> Json<Ack> {
    let from_name = from_name
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_SENDER.to_owned());

    Json(match messages.send(&from_name, &to_name, &message).await {
        Ok(_) => Ack::ok(),
        Err(e) => Ack::failed(e),
    })
}

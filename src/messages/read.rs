use std::sync::Arc;

use axum::{Json, debug_handler, extract::State};
use serde::Deserialize;

use crate::Ack;

use super::{MessageKey, MessageStore};

#[derive(Debug, Deserialize)]
pub struct MarkReadRequest {
    pub from_name: String,
    pub to_name: String,
    pub timestamp: String,
}

#[debug_handler]
pub async fn mark_read(
    State(messages): State<Arc<MessageStore>>,
    Json(MarkReadRequest { from_name, to_name, timestamp }): Json<MarkReadRequest>,
) -> Json<Ack> {
    let key = MessageKey { from_name, to_name, timestamp };
    Json(match messages.mark_read(key).await {
        Ok(updated) => Ack { updated: Some(updated), ..Ack::ok() },
        Err(e) => Ack::failed(e),
    })
}

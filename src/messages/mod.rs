mod read;
mod send;
mod store;

pub use read::mark_read;
pub use send::send_message;
pub use store::MessageStore;

use axum::{Router, routing::post};

use crate::{
    AppState, include_res,
    record::{Record, Row, decode_bool, encode_bool},
    res::escape,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/send_message", post(send_message))
        .route("/mark_read", post(mark_read))
}

/// Sender used when the client doesn't say who is writing.
pub const DEFAULT_SENDER: &str = "You";

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub from_name: String,
    pub to_name: String,
    pub body: String,
    pub timestamp: String,
    pub is_read: bool,
}

/// Identifies a message. Not guaranteed unique: two messages between the
/// same pair in the same second share a key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageKey {
    pub from_name: String,
    pub to_name: String,
    pub timestamp: String,
}

impl Message {
    pub fn key(&self) -> MessageKey {
        MessageKey {
            from_name: self.from_name.clone(),
            to_name: self.to_name.clone(),
            timestamp: self.timestamp.clone(),
        }
    }

    pub fn involves(&self, name: &str) -> bool {
        self.from_name == name || self.to_name == name
    }
}

impl Record for Message {
    const HEADER: &'static [&'static str] = &["From_Name", "To_Name", "Message", "Timestamp", "Is_Read"];

    fn to_row(&self) -> Vec<String> {
        vec![
            self.from_name.clone(),
            self.to_name.clone(),
            self.body.clone(),
            self.timestamp.clone(),
            encode_bool(self.is_read),
        ]
    }

    fn from_row(row: &Row<'_>) -> Result<Self, String> {
        Ok(Self {
            from_name: row.get("From_Name").to_owned(),
            to_name: row.get("To_Name").to_owned(),
            body: row.get("Message").to_owned(),
            timestamp: row.get("Timestamp").to_owned(),
            is_read: decode_bool(row.get("Is_Read")),
        })
    }
}

/// A mark-read event for one message key.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadReceipt {
    pub key: MessageKey,
    pub read_at: String,
}

impl Record for ReadReceipt {
    const HEADER: &'static [&'static str] = &["From_Name", "To_Name", "Timestamp", "Read_At"];

    fn to_row(&self) -> Vec<String> {
        vec![
            self.key.from_name.clone(),
            self.key.to_name.clone(),
            self.key.timestamp.clone(),
            self.read_at.clone(),
        ]
    }

    fn from_row(row: &Row<'_>) -> Result<Self, String> {
        Ok(Self {
            key: MessageKey {
                from_name: row.get("From_Name").to_owned(),
                to_name: row.get("To_Name").to_owned(),
                timestamp: row.get("Timestamp").to_owned(),
            },
            read_at: row.get("Read_At").to_owned(),
        })
    }
}

pub fn message_items(messages: &[Message]) -> String {
    if messages.is_empty() {
        return include_res!(str, "/pages/messages/empty.html").to_owned();
    }

    let mut items = String::new();
    for msg in messages {
        let (class, action) = if msg.is_read {
            ("", String::new())
        } else {
            (
                "unread",
                include_res!(str, "/pages/messages/mark_read.html")
                    .replace("{from}", &escape(&msg.from_name))
                    .replace("{to}", &escape(&msg.to_name))
                    .replace("{timestamp}", &escape(&msg.timestamp)),
            )
        };

        items += &include_res!(str, "/pages/messages/item.html")
            .replace("{class}", class)
            .replace("{action}", &action)
            .replace("{from}", &escape(&msg.from_name))
            .replace("{to}", &escape(&msg.to_name))
            .replace("{timestamp}", &escape(&msg.timestamp))
            .replace("{body}", &escape(&msg.body));
    }
    items
}

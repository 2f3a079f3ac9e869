pub mod appresult;
pub mod clock;
pub mod config;
pub mod error;
pub mod flights;
pub mod icebreakers;
pub mod index;
pub mod logging;
pub mod messages;
pub mod profiles;
pub mod record;
pub mod res;
pub mod verifications;

use std::{ops::Deref, sync::Arc};

use axum::{
    Router,
    extract::FromRef,
    response::{Html, IntoResponse},
    routing::get,
};
use serde::Serialize;
use tower_http::trace::TraceLayer;

pub use appresult::{AppError, AppResult};
pub use config::Config;

use messages::MessageStore;
use profiles::ProfileStore;
use verifications::VerificationStore;

pub const PROFILES_FILE: &str = "airport_profiles.csv";
pub const MESSAGES_FILE: &str = "messages.csv";
pub const READ_RECEIPTS_FILE: &str = "message_reads.csv";
pub const VERIFICATIONS_FILE: &str = "verifications.csv";

#[derive(Clone, FromRef)]
pub struct AppState {
    pub profiles: Arc<ProfileStore>,
    pub messages: Arc<MessageStore>,
    pub verifications: Arc<VerificationStore>,
}

impl AppState {
    /// Opens the stores under `config.data_dir`, creating any missing files.
    pub async fn open(config: &Config) -> error::Result<Self> {
        let dir = &config.data_dir;
        let state = Self {
            profiles: Arc::new(ProfileStore::new(dir.join(PROFILES_FILE))),
            messages: Arc::new(MessageStore::new(dir.join(MESSAGES_FILE), dir.join(READ_RECEIPTS_FILE))),
            verifications: Arc::new(VerificationStore::new(dir.join(VERIFICATIONS_FILE))),
        };

        state.profiles.init().await?;
        state.messages.init().await?;
        state.verifications.init().await?;
        Ok(state)
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/style.css", get(res::stylesheet))
        .route("/about", get(about))

        .merge(index::router())
        .merge(messages::router())
        .merge(flights::router())
        .merge(verifications::router())

        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn about() -> impl IntoResponse {
    Markdown(include_res!(str, "/pages/about.md"))
}

/// Reply of the JSON write endpoints. Failures are reported in-band.
#[derive(Debug, Serialize, PartialEq)]
pub struct Ack {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<usize>,
}

impl Ack {
    pub fn ok() -> Self {
        Self { success: true, error: None, updated: None }
    }

    pub fn failed(err: impl std::fmt::Display) -> Self {
        tracing::warn!("request failed: {err}");
        Self { success: false, error: Some(err.to_string()), updated: None }
    }
}

pub struct Markdown<T>(pub T);

impl<T> IntoResponse for Markdown<T>
where
    T: Deref<Target = str>
{
    fn into_response(self) -> axum::response::Response {
        use pulldown_cmark::{Options, Parser};

        let parser = Parser::new_ext(&*self.0, Options::ENABLE_TABLES);

        let mut html_output = String::new();
        pulldown_cmark::html::push_html(&mut html_output, parser);
        Html(
            include_res!(str, "/pages/markdown.html")
                .replace("{body}", &html_output)
        ).into_response()
    }
}

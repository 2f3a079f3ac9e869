//! Profile verification requests.
//!
//! Requests are only ever recorded as pending; nothing moves them to another
//! status.

use std::{path::PathBuf, sync::Arc};

use axum::{
    Json, Router, debug_handler,
    extract::{Path, State},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use crate::{
    Ack, AppState, clock,
    error::Result,
    record::{Record, Row, Table},
};

pub const PENDING: &str = "Pending";
pub const NOT_VERIFIED: &str = "Not_Verified";

#[derive(Debug, Clone, PartialEq)]
pub struct Verification {
    pub name: String,
    pub kind: String,
    pub status: String,
    pub timestamp: String,
}

impl Record for Verification {
    const HEADER: &'static [&'static str] = &["Name", "Verification_Type", "Status", "Timestamp"];

    fn to_row(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.kind.clone(),
            self.status.clone(),
            self.timestamp.clone(),
        ]
    }

    fn from_row(row: &Row<'_>) -> std::result::Result<Self, String> {
        Ok(Self {
            name: row.get("Name").to_owned(),
            kind: row.get("Verification_Type").to_owned(),
            status: row.get("Status").to_owned(),
            timestamp: row.get("Timestamp").to_owned(),
        })
    }
}

#[derive(Debug)]
pub struct VerificationStore {
    table: Table<Verification>,
}

impl VerificationStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { table: Table::new(path) }
    }

    pub async fn init(&self) -> Result<()> {
        self.table.init().await
    }

    pub async fn request(&self, name: &str, kind: &str) -> Result<Verification> {
        let verification = Verification {
            name: name.to_owned(),
            kind: kind.to_owned(),
            status: PENDING.to_owned(),
            timestamp: clock::timestamp(),
        };
        self.table.append(&verification).await?;
        tracing::info!(name, kind, "verification requested");
        Ok(verification)
    }

    pub async fn all(&self) -> Result<Vec<Verification>> {
        self.table.scan().await
    }

    /// Status of the traveler's first request, or `Not_Verified`.
    pub async fn status_of(&self, name: &str) -> Result<String> {
        Ok(self
            .all()
            .await?
            .into_iter()
            .find(|v| v.name == name)
            .map(|v| v.status)
            .unwrap_or_else(|| NOT_VERIFIED.to_owned()))
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/verify_profile", post(verify_profile))
        .route("/verification_status/{name}", get(verification_status))
}

#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[debug_handler]
pub async fn verify_profile(
    State(verifications): State<Arc<VerificationStore>>,
    Json(VerifyRequest { name, kind }): Json<VerifyRequest>,
) -> Json<Ack> {
    Json(match verifications.request(&name, &kind).await {
        Ok(_) => Ack::ok(),
        Err(e) => Ack::failed(e),
    })
}

#[derive(Debug, Serialize)]
pub struct VerificationStatusReply {
    pub name: String,
    pub status: String,
}

#[debug_handler]
pub async fn verification_status(
    State(verifications): State<Arc<VerificationStore>>,
    Path(name): Path<String>,
) -> crate::AppResult<Json<VerificationStatusReply>> {
    let status = verifications.status_of(&name).await?;
    Ok(Json(VerificationStatusReply { name, status }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, Arc<VerificationStore>) {
        let dir = tempfile::tempdir().unwrap();
        let store = VerificationStore::new(dir.path().join("verifications.csv"));
        (dir, Arc::new(store))
    }

    #[tokio::test]
    async fn every_request_is_pending() {
        let (_dir, store) = store();
        assert_eq!(store.status_of("Ada").await.unwrap(), NOT_VERIFIED);

        store.request("Ada", "ID").await.unwrap();
        store.request("Ada", "Phone").await.unwrap();

        let all = store.all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(all.iter().all(|v| v.status == PENDING));
        assert_eq!(all[1].kind, "Phone");
        assert_eq!(store.status_of("Ada").await.unwrap(), PENDING);
        assert_eq!(store.status_of("Bob").await.unwrap(), NOT_VERIFIED);
    }

    #[tokio::test]
    async fn endpoint_acknowledges_and_records() {
        let (_dir, store) = store();
        let request = VerifyRequest { name: "Ada".into(), kind: "Selfie".into() };

        let Json(ack) = verify_profile(State(store.clone()), Json(request)).await;
        assert_eq!(ack, Ack::ok());

        let Json(reply) = verification_status(State(store), Path("Ada".into())).await.unwrap();
        assert_eq!(reply.status, PENDING);
    }

    #[tokio::test]
    async fn write_failure_is_reported_in_band() {
        let dir = tempfile::tempdir().unwrap();
        // a directory where the file should be makes every append fail
        let path = dir.path().join("verifications.csv");
        std::fs::create_dir(&path).unwrap();
        let store = Arc::new(VerificationStore::new(path));

        let request = VerifyRequest { name: "Ada".into(), kind: "ID".into() };
        let Json(ack) = verify_profile(State(store), Json(request)).await;
        assert!(!ack.success);
        assert!(ack.error.is_some());
    }
}

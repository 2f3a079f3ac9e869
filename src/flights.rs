//! Simulated flight status. There is no real feed behind this: every lookup
//! picks one of a fixed set of statuses at random.

use std::fmt;

use axum::{Json, Router, debug_handler, extract::Path, routing::get};
use rand::seq::IndexedRandom;
use serde::Serialize;

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/flight_status/{flight_number}", get(flight_status))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightStatus {
    OnTime,
    Delayed15,
    Delayed30,
    Boarding,
    Departed,
}

impl FlightStatus {
    pub const ALL: [FlightStatus; 5] = [
        Self::OnTime,
        Self::Delayed15,
        Self::Delayed30,
        Self::Boarding,
        Self::Departed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OnTime => "On Time",
            Self::Delayed15 => "Delayed 15 min",
            Self::Delayed30 => "Delayed 30 min",
            Self::Boarding => "Boarding",
            Self::Departed => "Departed",
        }
    }

    /// Status for a flight. The flight number is ignored.
    pub fn lookup(flight_number: &str) -> Self {
        tracing::trace!(flight_number, "flight status lookup");
        Self::ALL
            .choose(&mut rand::rng())
            .copied()
            .unwrap_or(Self::OnTime)
    }
}

impl fmt::Display for FlightStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Serialize)]
pub struct FlightStatusReply {
    pub status: &'static str,
}

#[debug_handler]
pub async fn flight_status(Path(flight_number): Path<String>) -> Json<FlightStatusReply> {
    Json(FlightStatusReply {
        status: FlightStatus::lookup(&flight_number).as_str(),
    })
}

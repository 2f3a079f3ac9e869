mod card;
mod store;

pub use card::profile_cards;
pub use store::ProfileStore;

use crate::record::{Record, Row, decode_bool, encode_bool};

pub const STARTING_POINTS: u32 = 100;

/// What a traveler submits when checking in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewProfile {
    pub name: String,
    pub age: u32,
    pub bio: String,
    pub airport: String,
    pub terminal: String,
    pub gate: String,
    pub flight_number: String,
    pub departure_time: String,
    pub destination: String,
    pub travel_purpose: String,
    pub interests: Vec<String>,
    pub icebreaker_response: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub name: String,
    pub age: u32,
    pub bio: String,
    pub airport: String,
    pub terminal: String,
    pub gate: String,
    pub flight_number: String,
    pub departure_time: String,
    pub destination: String,
    pub travel_purpose: String,
    /// Interests joined with `", "`.
    pub interests: String,
    pub icebreaker_response: String,
    pub points: u32,
    pub is_visible: bool,
    pub is_verified: bool,
    pub timestamp: String,
}

impl Profile {
    pub fn from_new(new: NewProfile, timestamp: String) -> Self {
        Self {
            name: new.name,
            age: new.age,
            bio: new.bio,
            airport: new.airport,
            terminal: new.terminal,
            gate: new.gate,
            flight_number: new.flight_number,
            departure_time: new.departure_time,
            destination: new.destination,
            travel_purpose: new.travel_purpose,
            interests: new.interests.join(", "),
            icebreaker_response: new.icebreaker_response,
            points: STARTING_POINTS,
            is_visible: true,
            is_verified: false,
            timestamp,
        }
    }

    pub fn interest_list(&self) -> impl Iterator<Item = &str> {
        self.interests.split(", ").filter(|i| !i.is_empty())
    }

    pub fn initial(&self) -> char {
        self.name.chars().next().unwrap_or('U')
    }
}

impl Record for Profile {
    const HEADER: &'static [&'static str] = &[
        "Name",
        "Age",
        "Bio",
        "Airport",
        "Terminal",
        "Gate",
        "Flight_Number",
        "Departure_Time",
        "Destination",
        "Travel_Purpose",
        "Interests",
        "Icebreaker_Response",
        "Points",
        "Is_Visible",
        "Is_Verified",
        "Timestamp",
    ];

    fn to_row(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.age.to_string(),
            self.bio.clone(),
            self.airport.clone(),
            self.terminal.clone(),
            self.gate.clone(),
            self.flight_number.clone(),
            self.departure_time.clone(),
            self.destination.clone(),
            self.travel_purpose.clone(),
            self.interests.clone(),
            self.icebreaker_response.clone(),
            self.points.to_string(),
            encode_bool(self.is_visible),
            encode_bool(self.is_verified),
            self.timestamp.clone(),
        ]
    }

    fn from_row(row: &Row<'_>) -> Result<Self, String> {
        let number = |column: &str| -> Result<u32, String> {
            row.get(column)
                .trim()
                .parse()
                .map_err(|e| format!("{column}: {e}"))
        };

        Ok(Self {
            name: row.get("Name").to_owned(),
            age: number("Age")?,
            bio: row.get("Bio").to_owned(),
            airport: row.get("Airport").to_owned(),
            terminal: row.get("Terminal").to_owned(),
            gate: row.get("Gate").to_owned(),
            flight_number: row.get("Flight_Number").to_owned(),
            departure_time: row.get("Departure_Time").to_owned(),
            destination: row.get("Destination").to_owned(),
            travel_purpose: row.get("Travel_Purpose").to_owned(),
            interests: row.get("Interests").to_owned(),
            icebreaker_response: row.get("Icebreaker_Response").to_owned(),
            points: number("Points")?,
            is_visible: decode_bool(row.get("Is_Visible")),
            is_verified: decode_bool(row.get("Is_Verified")),
            timestamp: row.get("Timestamp").to_owned(),
        })
    }
}

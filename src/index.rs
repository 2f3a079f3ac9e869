use std::{collections::HashMap, sync::Arc};

use axum::{
    Form, Router, debug_handler,
    extract::{Query, State},
    response::{Html, Redirect},
    routing::get,
};
use serde::{Deserialize, Serialize};

use crate::{
    AppResult, AppState,
    error::{Error, Result},
    icebreakers, include_res,
    messages::{self, MessageStore},
    profiles::{self, NewProfile, ProfileStore},
    res::escape,
};

/// Airports offered as quick filters above the profile list.
const FILTER_AIRPORTS: [&str; 4] = ["SFO", "JFK", "LAX", "ORD"];
const FILTER_TERMINALS: [&str; 5] = ["Terminal 1", "Terminal 2", "Terminal 3", "Terminal 4", "Terminal 5"];

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index).post(checkin))
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct PageQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub airport: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terminal: Option<String>,
    /// The traveler viewing the page: shows their messages and sends as them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl PageQuery {
    pub fn url(&self) -> String {
        match serde_urlencoded::to_string(self) {
            Ok(query) if !query.is_empty() => format!("/?{query}"),
            _ => "/".to_owned(),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[debug_handler(state = AppState)]
pub async fn index(
    State(profiles): State<Arc<ProfileStore>>,
    State(messages): State<Arc<MessageStore>>,
    Query(query): Query<PageQuery>,
) -> AppResult<Html<String>> {
    let airport = non_empty(&query.airport);
    let terminal = non_empty(&query.terminal);
    let viewer = non_empty(&query.name);

    let listed = match (airport, terminal) {
        (Some(airport), Some(terminal)) => profiles.by_location(airport, terminal).await?,
        (Some(airport), None) => profiles.by_airport(airport).await?,
        _ => profiles.all().await?,
    };

    let (inbox, create) = match viewer {
        Some(name) => (
            messages.for_user(name).await?,
            include_res!(str, "/pages/welcome.html").replace("{name}", &escape(name)),
        ),
        None => (
            Vec::new(),
            include_res!(str, "/pages/checkin_form.html")
                .replace("{icebreaker}", &escape(icebreakers::random())),
        ),
    };

    Ok(Html(
        include_res!(str, "/pages/index.html")
            .replace("{viewer}", &escape(viewer.unwrap_or("")))
            .replace("{filters}", &filters(airport, terminal, viewer))
            .replace("{profiles}", &profiles::profile_cards(&listed))
            .replace("{messages}", &messages::message_items(&inbox))
            .replace("{create}", &create)
    ))
}

/// Saves the profile, then sends the browser to the page as the new traveler
/// so a reload doesn't submit the form again.
#[debug_handler]
pub async fn checkin(
    State(profiles): State<Arc<ProfileStore>>,
    Form(fields): Form<Vec<(String, String)>>,
) -> AppResult<Redirect> {
    let new = checkin_form(fields)?;
    let profile = profiles.create(new).await?;

    let page = PageQuery { name: Some(profile.name), ..PageQuery::default() };
    Ok(Redirect::to(&page.url()))
}

fn filters(airport: Option<&str>, terminal: Option<&str>, viewer: Option<&str>) -> String {
    let option = |label: &str, page: PageQuery, active: bool| {
        format!(
            r#"<a class="filter-option{}" href="{}">{}</a>"#,
            if active { " active" } else { "" },
            escape(&page.url()),
            escape(label),
        )
    };
    let page = |airport: Option<&str>, terminal: Option<&str>| PageQuery {
        airport: airport.map(str::to_owned),
        terminal: terminal.map(str::to_owned),
        name: viewer.map(str::to_owned),
    };

    let mut filters = option("All Airports", page(None, None), airport.is_none());
    for code in FILTER_AIRPORTS {
        filters += &option(code, page(Some(code), None), airport == Some(code));
    }

    if let Some(airport) = airport {
        filters += r#"<div class="filter-break"></div>"#;
        filters += &option("All Terminals", page(Some(airport), None), terminal.is_none());
        for name in FILTER_TERMINALS {
            filters += &option(name, page(Some(airport), Some(name)), terminal == Some(name));
        }
    }
    filters
}

fn required(fields: &mut HashMap<String, String>, name: &'static str) -> Result<String> {
    fields.remove(name).ok_or(Error::MissingField(name))
}

/// Builds a profile from the submitted check-in form. Every field but `gate`
/// and `interests` must be present; `interests` may repeat.
pub fn checkin_form(pairs: Vec<(String, String)>) -> Result<NewProfile> {
    let mut interests = Vec::new();
    let mut fields = HashMap::new();
    for (key, value) in pairs {
        if key == "interests" {
            interests.push(value);
        } else {
            fields.insert(key, value);
        }
    }

    let age = required(&mut fields, "age")?;
    let age = age
        .trim()
        .parse()
        .map_err(|_| Error::InvalidField { field: "age", value: age.clone() })?;

    Ok(NewProfile {
        name: required(&mut fields, "name")?,
        age,
        bio: required(&mut fields, "bio")?,
        airport: required(&mut fields, "airport")?,
        terminal: required(&mut fields, "terminal")?,
        gate: fields.remove("gate").unwrap_or_default(),
        flight_number: required(&mut fields, "flight_number")?,
        departure_time: required(&mut fields, "departure_time")?,
        destination: required(&mut fields, "destination")?,
        travel_purpose: required(&mut fields, "travel_purpose")?,
        interests,
        icebreaker_response: required(&mut fields, "icebreaker_response")?,
    })
}

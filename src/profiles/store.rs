use std::path::PathBuf;

use crate::{clock, error::Result, record::Table};

use super::{NewProfile, Profile};

#[derive(Debug)]
pub struct ProfileStore {
    table: Table<Profile>,
}

impl ProfileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { table: Table::new(path) }
    }

    pub async fn init(&self) -> Result<()> {
        self.table.init().await
    }

    /// Checks a traveler in. Names are not deduplicated.
    pub async fn create(&self, new: NewProfile) -> Result<Profile> {
        let profile = Profile::from_new(new, clock::timestamp());
        self.insert(&profile).await?;
        Ok(profile)
    }

    pub async fn insert(&self, profile: &Profile) -> Result<()> {
        self.table.append(profile).await?;
        tracing::info!(
            name = %profile.name,
            airport = %profile.airport,
            terminal = %profile.terminal,
            "traveler checked in"
        );
        Ok(())
    }

    /// Every profile in check-in order, hidden ones included.
    pub async fn all(&self) -> Result<Vec<Profile>> {
        self.table.scan().await
    }

    pub async fn by_location(&self, airport: &str, terminal: &str) -> Result<Vec<Profile>> {
        Ok(self
            .all()
            .await?
            .into_iter()
            .filter(|p| p.is_visible && p.airport == airport && p.terminal == terminal)
            .collect())
    }

    pub async fn by_airport(&self, airport: &str) -> Result<Vec<Profile>> {
        Ok(self
            .all()
            .await?
            .into_iter()
            .filter(|p| p.is_visible && p.airport == airport)
            .collect())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn traveler(name: &str, airport: &str, terminal: &str) -> NewProfile {
        NewProfile {
            name: name.to_owned(),
            age: 29,
            bio: "Always early, never bored".to_owned(),
            airport: airport.to_owned(),
            terminal: terminal.to_owned(),
            gate: "B5".to_owned(),
            flight_number: "DL456".to_owned(),
            departure_time: "18:45".to_owned(),
            destination: "Tokyo".to_owned(),
            travel_purpose: "Leisure".to_owned(),
            interests: vec!["Travel".to_owned(), "Food & Dining".to_owned()],
            icebreaker_response: "Window, always".to_owned(),
        }
    }

    fn store() -> (tempfile::TempDir, ProfileStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::new(dir.path().join("airport_profiles.csv"));
        (dir, store)
    }

    #[tokio::test]
    async fn lists_profiles_in_check_in_order() {
        let (_dir, store) = store();
        let names = ["Ada", "Bob", "Cy", "Ada", "Dee"];
        for name in names {
            store.create(traveler(name, "SFO", "Terminal 1")).await.unwrap();
        }

        let all = store.all().await.unwrap();
        assert_eq!(all.len(), names.len());
        assert_eq!(all.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(), names);
    }

    #[tokio::test]
    async fn new_profiles_get_defaults() {
        let (_dir, store) = store();
        let created = store.create(traveler("Ada", "JFK", "Terminal 4")).await.unwrap();

        assert_eq!(created.points, 100);
        assert!(created.is_visible);
        assert!(!created.is_verified);
        assert_eq!(created.interests, "Travel, Food & Dining");

        let read_back = store.all().await.unwrap();
        assert_eq!(read_back, vec![created]);
    }

    #[tokio::test]
    async fn location_filters_skip_hidden_and_elsewhere() {
        let (_dir, store) = store();
        store.create(traveler("Ada", "SFO", "Terminal 1")).await.unwrap();
        store.create(traveler("Bob", "SFO", "Terminal 2")).await.unwrap();
        store.create(traveler("Cy", "LAX", "Terminal 1")).await.unwrap();

        let mut hidden = Profile::from_new(traveler("Dee", "SFO", "Terminal 1"), clock::timestamp());
        hidden.is_visible = false;
        store.insert(&hidden).await.unwrap();

        let here = store.by_location("SFO", "Terminal 1").await.unwrap();
        assert_eq!(here.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(), ["Ada"]);

        let sfo = store.by_airport("SFO").await.unwrap();
        assert_eq!(sfo.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(), ["Ada", "Bob"]);

        assert_eq!(store.all().await.unwrap().len(), 4);
    }
}

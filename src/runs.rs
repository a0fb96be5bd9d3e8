//! Group runs and races
//!
//! Models the runs users organise and join, the filters of the run overview, and
//! the collaborators the app relies on for storage, address lookup and login.
//! The collaborators are traits only; the prediction engine never calls them.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{RacePaceError, Result};

/// Distances (km) a race can be entered with
pub const RACE_DISTANCE_OPTIONS: [f64; 7] = [5.0, 10.0, 15.0, 21.1, 25.0, 30.0, 42.2];

/// A stored group run or race
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Run {
    pub id: Uuid,
    pub organizer_id: String,
    pub start_time: NaiveDateTime,
    /// `street, city`
    pub location: String,
    /// Primary distance; the shortest entered distance for races
    pub distance_km: f64,
    /// Race distances joined as `5, 10`
    pub race_distances: Option<String>,
    pub pace_min: Option<String>,
    pub pace_max: Option<String>,
    pub description: String,
    pub is_race: bool,
    pub title: Option<String>,
    pub external_link: Option<String>,
}

/// Form input for creating a run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunDraft {
    pub start_time: Option<NaiveDateTime>,
    pub city: String,
    pub street: String,
    pub distance_km: Option<f64>,
    pub pace_min: Option<String>,
    pub pace_max: Option<String>,
    pub description: String,
    pub is_race: bool,
    pub title: Option<String>,
    pub external_link: Option<String>,
    /// Selected race distances, kept sorted ascending
    pub race_distances: Vec<f64>,
}

impl RunDraft {
    /// Add or remove a race distance, keeping the selection sorted
    pub fn toggle_race_distance(&mut self, distance_km: f64) {
        if let Some(pos) = self.race_distances.iter().position(|&d| d == distance_km) {
            self.race_distances.remove(pos);
        } else {
            self.race_distances.push(distance_km);
            self.race_distances.sort_by(|a, b| a.total_cmp(b));
        }
    }

    /// Query string handed to the geocoder
    pub fn address_query(&self) -> String {
        format!("{}, {}", self.street.trim(), self.city.trim())
    }

    /// Validate the draft and turn it into a run owned by `organizer_id`
    pub fn into_run(self, organizer_id: &str) -> Result<Run> {
        let start_time = self
            .start_time
            .ok_or_else(|| RacePaceError::Validation("A start time is required".to_string()))?;
        if self.city.trim().is_empty() {
            return Err(RacePaceError::Validation("A city is required".to_string()));
        }

        let location = self.address_query();
        let (distance_km, race_distances, pace_min, pace_max, title) = if self.is_race {
            let first = *self.race_distances.first().ok_or_else(|| {
                RacePaceError::Validation("Select at least one race distance".to_string())
            })?;
            if let Some(unknown) = self
                .race_distances
                .iter()
                .find(|d| !RACE_DISTANCE_OPTIONS.contains(d))
            {
                return Err(RacePaceError::Validation(format!(
                    "Unsupported race distance: {} km",
                    unknown
                )));
            }
            let joined = self
                .race_distances
                .iter()
                .map(|d| d.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            (first, Some(joined), None, None, self.title)
        } else {
            let distance = self
                .distance_km
                .filter(|d| d.is_finite() && *d > 0.0)
                .ok_or_else(|| RacePaceError::Validation("A positive distance is required".to_string()))?;
            (distance, None, self.pace_min, self.pace_max, None)
        };

        Ok(Run {
            id: Uuid::new_v4(),
            organizer_id: organizer_id.to_string(),
            start_time,
            location,
            distance_km,
            race_distances,
            pace_min,
            pace_max,
            description: self.description,
            is_race: self.is_race,
            title,
            external_link: self.external_link.filter(|link| !link.trim().is_empty()),
        })
    }
}

/// Filters of the run overview; unset fields match everything
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunFilter {
    /// Case-insensitive substring of the location
    pub location: Option<String>,
    pub min_distance_km: Option<f64>,
    pub max_distance_km: Option<f64>,
    pub from: Option<NaiveDateTime>,
    pub until: Option<NaiveDateTime>,
    pub is_race: Option<bool>,
}

impl RunFilter {
    pub fn is_empty(&self) -> bool {
        *self == RunFilter::default()
    }

    pub fn matches(&self, run: &Run) -> bool {
        if let Some(location) = self.location.as_deref().filter(|l| !l.is_empty()) {
            if !run.location.to_lowercase().contains(&location.to_lowercase()) {
                return false;
            }
        }
        if self.min_distance_km.is_some_and(|min| run.distance_km < min) {
            return false;
        }
        if self.max_distance_km.is_some_and(|max| run.distance_km > max) {
            return false;
        }
        if self.from.is_some_and(|from| run.start_time < from) {
            return false;
        }
        if self.until.is_some_and(|until| run.start_time > until) {
            return false;
        }
        if self.is_race.is_some_and(|is_race| run.is_race != is_race) {
            return false;
        }
        true
    }

    /// Runs passing the filter, in input order
    pub fn apply<'a>(&self, runs: &'a [Run]) -> Vec<&'a Run> {
        runs.iter().filter(|run| self.matches(run)).collect()
    }
}

/// Result of an address lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeocodeResult {
    pub found: bool,
    pub region: Option<String>,
}

/// Address validation against a map service
pub trait Geocoder {
    fn lookup(&self, address: &str) -> Result<GeocodeResult>;
}

/// Identity of the logged-in user
pub trait SessionProvider {
    fn current_user(&self) -> Option<String>;
}

/// Persistence for runs and their participants
pub trait RunStore {
    fn create(&mut self, run: Run) -> Result<Run>;
    fn get(&self, id: Uuid) -> Result<Option<Run>>;
    fn list(&self, filter: &RunFilter) -> Result<Vec<Run>>;
    fn update(&mut self, run: Run) -> Result<Run>;
    fn delete(&mut self, id: Uuid) -> Result<()>;

    fn participants(&self, run_id: Uuid) -> Result<Vec<String>>;
    fn add_participant(&mut self, run_id: Uuid, user_id: &str) -> Result<()>;
    fn remove_participant(&mut self, run_id: Uuid, user_id: &str) -> Result<()>;
}

/// Run workflows over the external collaborators
pub struct RunService;

impl RunService {
    /// Create a run for the logged-in user after validating its address
    pub fn create_run(
        session: &dyn SessionProvider,
        geocoder: &dyn Geocoder,
        store: &mut dyn RunStore,
        draft: RunDraft,
    ) -> Result<Run> {
        let user = Self::require_user(session)?;

        let address = draft.address_query();
        if !geocoder.lookup(&address)?.found {
            warn!(%address, "Address not found");
            return Err(RacePaceError::Validation(format!("Address not found: {}", address)));
        }

        let run = store.create(draft.into_run(&user)?)?;
        info!(run_id = %run.id, is_race = run.is_race, "Run created");
        Ok(run)
    }

    /// Join the run, or leave it when already joined. Returns whether the user is now joined.
    pub fn toggle_participation(
        session: &dyn SessionProvider,
        store: &mut dyn RunStore,
        run_id: Uuid,
    ) -> Result<bool> {
        let user = Self::require_user(session)?;
        let joined = store.participants(run_id)?.iter().any(|p| *p == user);

        if joined {
            store.remove_participant(run_id, &user)?;
        } else {
            store.add_participant(run_id, &user)?;
        }
        Ok(!joined)
    }

    /// Only the organiser may edit, and only while nobody else has joined
    pub fn can_edit(store: &dyn RunStore, run: &Run, user_id: &str) -> Result<bool> {
        if run.organizer_id != user_id {
            return Ok(false);
        }
        let others = store.participants(run.id)?.into_iter().any(|p| p != user_id);
        Ok(!others)
    }

    /// Save changes to a run the logged-in user may still edit
    pub fn update_run(
        session: &dyn SessionProvider,
        store: &mut dyn RunStore,
        run: Run,
    ) -> Result<Run> {
        let user = Self::require_user(session)?;
        let existing = store
            .get(run.id)?
            .ok_or_else(|| RacePaceError::Validation(format!("Run not found: {}", run.id)))?;
        if !Self::can_edit(&*store, &existing, &user)? {
            return Err(RacePaceError::Validation(
                "Participants have joined; the run can no longer be changed".to_string(),
            ));
        }
        store.update(Run {
            organizer_id: existing.organizer_id,
            ..run
        })
    }

    /// Delete a run; organiser only
    pub fn delete_run(
        session: &dyn SessionProvider,
        store: &mut dyn RunStore,
        run_id: Uuid,
    ) -> Result<()> {
        let user = Self::require_user(session)?;
        let run = store
            .get(run_id)?
            .ok_or_else(|| RacePaceError::Validation(format!("Run not found: {}", run_id)))?;
        if run.organizer_id != user {
            return Err(RacePaceError::Validation("Only the organiser can delete a run".to_string()));
        }
        store.delete(run_id)?;
        info!(%run_id, "Run deleted");
        Ok(())
    }

    fn require_user(session: &dyn SessionProvider) -> Result<String> {
        session
            .current_user()
            .ok_or_else(|| RacePaceError::Validation("You must be logged in".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::HashMap;

    struct FixedSession(Option<String>);

    impl SessionProvider for FixedSession {
        fn current_user(&self) -> Option<String> {
            self.0.clone()
        }
    }

    struct KnownAddresses(Vec<&'static str>);

    impl Geocoder for KnownAddresses {
        fn lookup(&self, address: &str) -> Result<GeocodeResult> {
            let found = self.0.iter().any(|known| *known == address);
            Ok(GeocodeResult {
                found,
                region: found.then(|| "Gelderland".to_string()),
            })
        }
    }

    #[derive(Default)]
    struct MemoryStore {
        runs: Vec<Run>,
        participants: HashMap<Uuid, Vec<String>>,
    }

    impl RunStore for MemoryStore {
        fn create(&mut self, run: Run) -> Result<Run> {
            self.runs.push(run.clone());
            Ok(run)
        }

        fn get(&self, id: Uuid) -> Result<Option<Run>> {
            Ok(self.runs.iter().find(|r| r.id == id).cloned())
        }

        fn list(&self, filter: &RunFilter) -> Result<Vec<Run>> {
            Ok(filter.apply(&self.runs).into_iter().cloned().collect())
        }

        fn update(&mut self, run: Run) -> Result<Run> {
            if let Some(existing) = self.runs.iter_mut().find(|r| r.id == run.id) {
                *existing = run.clone();
            }
            Ok(run)
        }

        fn delete(&mut self, id: Uuid) -> Result<()> {
            self.runs.retain(|r| r.id != id);
            Ok(())
        }

        fn participants(&self, run_id: Uuid) -> Result<Vec<String>> {
            Ok(self.participants.get(&run_id).cloned().unwrap_or_default())
        }

        fn add_participant(&mut self, run_id: Uuid, user_id: &str) -> Result<()> {
            self.participants.entry(run_id).or_default().push(user_id.to_string());
            Ok(())
        }

        fn remove_participant(&mut self, run_id: Uuid, user_id: &str) -> Result<()> {
            if let Some(list) = self.participants.get_mut(&run_id) {
                list.retain(|p| p != user_id);
            }
            Ok(())
        }
    }

    fn at(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 5, day)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn draft(city: &str, distance: f64) -> RunDraft {
        RunDraft {
            start_time: Some(at(10)),
            city: city.to_string(),
            street: "Markt 1".to_string(),
            distance_km: Some(distance),
            pace_min: Some("5:30".to_string()),
            pace_max: Some("6:00".to_string()),
            description: "Sunday social run".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_race_draft_uses_shortest_distance() {
        let mut race = draft("Aalten", 0.0);
        race.is_race = true;
        race.title = Some("Spring Run".to_string());
        race.toggle_race_distance(10.0);
        race.toggle_race_distance(5.0);
        race.toggle_race_distance(21.1);
        race.toggle_race_distance(21.1);

        let run = race.into_run("alice").unwrap();
        assert_eq!(run.distance_km, 5.0);
        assert_eq!(run.race_distances.as_deref(), Some("5, 10"));
        assert!(run.pace_min.is_none());
        assert_eq!(run.title.as_deref(), Some("Spring Run"));
    }

    #[test]
    fn test_draft_validation() {
        let mut race = draft("Aalten", 0.0);
        race.is_race = true;
        assert!(race.into_run("alice").is_err());

        let mut odd = draft("Aalten", 0.0);
        odd.is_race = true;
        odd.toggle_race_distance(7.0);
        assert!(odd.into_run("alice").is_err());

        assert!(draft("Aalten", 0.0).into_run("alice").is_err());
        assert!(draft("  ", 10.0).into_run("alice").is_err());

        let run = draft("Aalten", 10.0).into_run("alice").unwrap();
        assert_eq!(run.location, "Markt 1, Aalten");
        assert!(run.title.is_none());
    }

    #[test]
    fn test_filter_matching() {
        let runs = vec![
            draft("Aalten", 5.0).into_run("a").unwrap(),
            draft("Winterswijk", 10.0).into_run("b").unwrap(),
            draft("Lichtenvoorde", 21.1).into_run("c").unwrap(),
        ];

        let by_location = RunFilter {
            location: Some("WINTER".to_string()),
            ..Default::default()
        };
        assert_eq!(by_location.apply(&runs).len(), 1);

        let by_distance = RunFilter {
            min_distance_km: Some(6.0),
            max_distance_km: Some(21.1),
            ..Default::default()
        };
        assert_eq!(by_distance.apply(&runs).len(), 2);

        let by_date = RunFilter {
            from: Some(at(11)),
            ..Default::default()
        };
        assert!(by_date.apply(&runs).is_empty());

        let races_only = RunFilter {
            is_race: Some(true),
            ..Default::default()
        };
        assert!(races_only.apply(&runs).is_empty());

        assert!(RunFilter::default().is_empty());
        assert_eq!(RunFilter::default().apply(&runs).len(), 3);
    }

    #[test]
    fn test_create_run_requires_login_and_known_address() {
        let geocoder = KnownAddresses(vec!["Markt 1, Aalten"]);
        let mut store = MemoryStore::default();

        let anonymous = FixedSession(None);
        assert!(RunService::create_run(&anonymous, &geocoder, &mut store, draft("Aalten", 10.0)).is_err());

        let alice = FixedSession(Some("alice".to_string()));
        assert!(RunService::create_run(&alice, &geocoder, &mut store, draft("Nowhere", 10.0)).is_err());

        let run = RunService::create_run(&alice, &geocoder, &mut store, draft("Aalten", 10.0)).unwrap();
        assert_eq!(run.organizer_id, "alice");
        assert_eq!(store.list(&RunFilter::default()).unwrap().len(), 1);
    }

    #[test]
    fn test_participation_and_editing() {
        let mut store = MemoryStore::default();
        let run = store.create(draft("Aalten", 10.0).into_run("alice").unwrap()).unwrap();

        let alice = FixedSession(Some("alice".to_string()));
        let bob = FixedSession(Some("bob".to_string()));

        assert!(RunService::can_edit(&store, &run, "alice").unwrap());
        assert!(!RunService::can_edit(&store, &run, "bob").unwrap());

        assert!(RunService::toggle_participation(&alice, &mut store, run.id).unwrap());
        assert!(RunService::can_edit(&store, &run, "alice").unwrap());

        assert!(RunService::toggle_participation(&bob, &mut store, run.id).unwrap());
        assert!(!RunService::can_edit(&store, &run, "alice").unwrap());

        assert!(!RunService::toggle_participation(&bob, &mut store, run.id).unwrap());
        assert_eq!(store.participants(run.id).unwrap(), vec!["alice".to_string()]);
    }

    #[test]
    fn test_update_blocked_after_others_join() {
        let mut store = MemoryStore::default();
        let run = store.create(draft("Aalten", 10.0).into_run("alice").unwrap()).unwrap();
        let alice = FixedSession(Some("alice".to_string()));

        let longer = Run {
            distance_km: 12.0,
            ..run.clone()
        };
        let saved = RunService::update_run(&alice, &mut store, longer).unwrap();
        assert_eq!(saved.distance_km, 12.0);

        store.add_participant(run.id, "bob").unwrap();
        let shorter = Run {
            distance_km: 8.0,
            ..run.clone()
        };
        assert!(RunService::update_run(&alice, &mut store, shorter).is_err());
        assert_eq!(store.get(run.id).unwrap().unwrap().distance_km, 12.0);
    }

    #[test]
    fn test_only_organizer_deletes() {
        let mut store = MemoryStore::default();
        let run = store.create(draft("Aalten", 10.0).into_run("alice").unwrap()).unwrap();

        let bob = FixedSession(Some("bob".to_string()));
        assert!(RunService::delete_run(&bob, &mut store, run.id).is_err());

        let alice = FixedSession(Some("alice".to_string()));
        RunService::delete_run(&alice, &mut store, run.id).unwrap();
        assert!(store.get(run.id).unwrap().is_none());
    }
}

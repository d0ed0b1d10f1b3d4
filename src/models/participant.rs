//! Participant data structure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a participant (used in match slots and lookups).
pub type ParticipantId = Uuid;

/// Affiliation used when none is given at registration.
pub const DEFAULT_AFFILIATION: &str = "Freelance";

/// A registered participant.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    pub affiliation: String,
    /// Advisory only; the bracket never sets it.
    pub eliminated: bool,
    pub registered_at: DateTime<Utc>,
}

impl Participant {
    /// Create a participant with a fresh id. A blank affiliation falls back to [`DEFAULT_AFFILIATION`].
    pub fn new(name: impl Into<String>, affiliation: Option<&str>) -> Self {
        let affiliation = affiliation
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .unwrap_or(DEFAULT_AFFILIATION);
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            affiliation: affiliation.to_string(),
            eliminated: false,
            registered_at: Utc::now(),
        }
    }

    /// "Name from Affiliation", the way commentators introduce a bowler.
    pub fn introduction(&self) -> String {
        format!("{} from {}", self.name, self.affiliation)
    }
}

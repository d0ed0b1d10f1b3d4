//! Bracket match, its identifier, and how a match resolves for advancement.

use crate::models::participant::ParticipantId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unique identifier for a match: round number plus a per-tournament serial.
///
/// Serialized as `m-<round>-<serial>`. The serial is drawn from a monotonic counter owned by
/// the tournament, so matches created later (late joiners) never collide with earlier ones.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct MatchId {
    pub round: u32,
    pub serial: u64,
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m-{}-{}", self.round, self.serial)
    }
}

/// The string was not of the form `m-<round>-<serial>`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseMatchIdError(String);

impl fmt::Display for ParseMatchIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid match id: {:?}", self.0)
    }
}

impl std::error::Error for ParseMatchIdError {}

impl FromStr for MatchId {
    type Err = ParseMatchIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseMatchIdError(s.to_string());
        let rest = s.strip_prefix("m-").ok_or_else(err)?;
        let (round, serial) = rest.split_once('-').ok_or_else(err)?;
        let round: u32 = round.parse().map_err(|_| err())?;
        if round == 0 {
            return Err(err());
        }
        Ok(Self {
            round,
            serial: serial.parse().map_err(|_| err())?,
        })
    }
}

impl From<MatchId> for String {
    fn from(id: MatchId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for MatchId {
    type Error = ParseMatchIdError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// How a single match feeds the next round.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "participant")]
pub enum RoundResolution {
    /// This participant goes through, by declared win or by bye.
    Advances(ParticipantId),
    /// Two participants, no winner yet.
    Unresolved,
}

/// A single-elimination match. `slot_b == None` is a bye.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BracketMatch {
    pub id: MatchId,
    pub round: u32,
    pub slot_a: ParticipantId,
    pub slot_b: Option<ParticipantId>,
    /// None if not yet decided. Once set it never changes.
    pub winner: Option<ParticipantId>,
}

impl BracketMatch {
    pub fn new(id: MatchId, slot_a: ParticipantId, slot_b: Option<ParticipantId>) -> Self {
        Self {
            id,
            round: id.round,
            slot_a,
            slot_b,
            winner: None,
        }
    }

    pub fn is_bye(&self) -> bool {
        self.slot_b.is_none()
    }

    pub fn is_decided(&self) -> bool {
        self.winner.is_some()
    }

    /// True if `participant` sits in either slot.
    pub fn involves(&self, participant: ParticipantId) -> bool {
        self.slot_a == participant || self.slot_b == Some(participant)
    }

    /// A declared winner wins; otherwise a bye passes `slot_a` through.
    pub fn resolution(&self) -> RoundResolution {
        match (self.winner, self.slot_b) {
            (Some(w), _) => RoundResolution::Advances(w),
            (None, None) => RoundResolution::Advances(self.slot_a),
            (None, Some(_)) => RoundResolution::Unresolved,
        }
    }

    /// The participant who lost, if the match was played and decided.
    pub fn loser(&self) -> Option<ParticipantId> {
        let winner = self.winner?;
        let slot_b = self.slot_b?;
        Some(if winner == self.slot_a { slot_b } else { self.slot_a })
    }
}

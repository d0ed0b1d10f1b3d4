//! Tournament state and the refusals bracket operations can return.

use crate::models::bracket_match::{BracketMatch, MatchId, RoundResolution};
use crate::models::participant::{Participant, ParticipantId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Why an operation was refused. A refused operation never mutates the tournament.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Refusal {
    /// Participant name is empty after trimming.
    EmptyName,
    /// The bracket has already been drawn.
    AlreadyStarted,
    /// The bracket has not been drawn yet.
    NotStarted,
    /// Need at least 2 participants to start.
    NotEnoughParticipants { registered: usize },
    ParticipantNotFound(ParticipantId),
    /// The participant already occupies a slot in the bracket.
    AlreadyInBracket(ParticipantId),
    MatchNotFound(MatchId),
    /// The participant is not one of the match's two slots.
    NotInMatch {
        match_id: MatchId,
        participant: ParticipantId,
    },
    /// The match already has a winner.
    AlreadyDecided(MatchId),
    /// Not enough resolved participants (or, under the strict policy, unresolved matches remain).
    RoundIncomplete { round: u32, resolved: usize },
}

impl std::fmt::Display for Refusal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Refusal::EmptyName => write!(f, "Participant name must not be empty"),
            Refusal::AlreadyStarted => write!(f, "Tournament has already started"),
            Refusal::NotStarted => write!(f, "Tournament has not started"),
            Refusal::NotEnoughParticipants { registered } => {
                write!(f, "Need at least 2 participants to start (have {})", registered)
            }
            Refusal::ParticipantNotFound(_) => write!(f, "Participant not found"),
            Refusal::AlreadyInBracket(_) => write!(f, "Participant is already in the bracket"),
            Refusal::MatchNotFound(id) => write!(f, "Match {} not found", id),
            Refusal::NotInMatch { match_id, .. } => {
                write!(f, "Participant is not playing in match {}", match_id)
            }
            Refusal::AlreadyDecided(id) => write!(f, "Match {} already has a winner", id),
            Refusal::RoundIncomplete { round, .. } => {
                write!(f, "Finish all matches in round {} first", round)
            }
        }
    }
}

impl std::error::Error for Refusal {}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Full tournament state: roster, every match ever created, and whether the bracket is drawn.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub started: bool,
    /// Registration order; display only, not seeding.
    pub roster: Vec<Participant>,
    /// Flat list of matches across all rounds, in creation order.
    pub matches: Vec<BracketMatch>,
    #[serde(skip)]
    next_match_serial: u64,
}

impl Default for Tournament {
    fn default() -> Self {
        Self::new()
    }
}

impl Tournament {
    /// Create an empty, not-started tournament.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            started: false,
            roster: Vec::new(),
            matches: Vec::new(),
            next_match_serial: 0,
        }
    }

    pub fn participant(&self, id: ParticipantId) -> Option<&Participant> {
        self.roster.iter().find(|p| p.id == id)
    }

    pub fn find_match(&self, id: MatchId) -> Option<&BracketMatch> {
        self.matches.iter().find(|m| m.id == id)
    }

    pub(crate) fn find_match_mut(&mut self, id: MatchId) -> Option<&mut BracketMatch> {
        self.matches.iter_mut().find(|m| m.id == id)
    }

    /// Highest round number among all matches; None before the bracket is drawn.
    pub fn current_round(&self) -> Option<u32> {
        self.matches.iter().map(|m| m.round).max()
    }

    pub fn matches_in_round(&self, round: u32) -> impl Iterator<Item = &BracketMatch> {
        self.matches.iter().filter(move |m| m.round == round)
    }

    /// Matches grouped by round, rounds ascending, creation order within a round.
    pub fn rounds(&self) -> BTreeMap<u32, Vec<&BracketMatch>> {
        let mut by_round: BTreeMap<u32, Vec<&BracketMatch>> = BTreeMap::new();
        for m in &self.matches {
            by_round.entry(m.round).or_default().push(m);
        }
        by_round
    }

    /// How each match of `round` feeds the next round, in match order.
    pub fn round_resolutions(&self, round: u32) -> Vec<(MatchId, RoundResolution)> {
        self.matches_in_round(round)
            .map(|m| (m.id, m.resolution()))
            .collect()
    }

    /// True if the participant occupies a slot in any match.
    pub fn is_in_bracket(&self, participant: ParticipantId) -> bool {
        self.matches.iter().any(|m| m.involves(participant))
    }

    /// The winner of the tournament: the highest round holds a single match and it is resolved.
    pub fn champion(&self) -> Option<ParticipantId> {
        let round = self.current_round()?;
        let mut final_round = self.matches_in_round(round);
        let only = final_round.next()?;
        if final_round.next().is_some() {
            return None;
        }
        match only.resolution() {
            // A lone bye in round 1 is not a tournament.
            RoundResolution::Advances(id) if round > 1 || !only.is_bye() => Some(id),
            _ => None,
        }
    }

    /// Allocate the next match id for `round`.
    pub(crate) fn next_match_id(&mut self, round: u32) -> MatchId {
        // The counter is not serialized; never hand out a serial already in use.
        let in_use = self.matches.iter().map(|m| m.id.serial + 1).max().unwrap_or(0);
        let serial = self.next_match_serial.max(in_use);
        self.next_match_serial = serial + 1;
        MatchId { round, serial }
    }

    /// Back to registration: same roster, no matches. Serials keep counting so old ids stay unique.
    pub(crate) fn clear_bracket(&mut self) {
        self.matches.clear();
        self.started = false;
    }
}

//! Data structures for the bracket: participants, matches, tournament state.

mod bracket_match;
mod participant;
mod tournament;

pub use bracket_match::{BracketMatch, MatchId, ParseMatchIdError, RoundResolution};
pub use participant::{Participant, ParticipantId, DEFAULT_AFFILIATION};
pub use tournament::{Refusal, Tournament, TournamentId};

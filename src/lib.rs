//! Single-elimination bowling bracket: engine library with models and business logic.

pub mod commentary;
mod engine;
mod logic;
pub mod models;

pub use engine::BracketEngine;
pub use logic::{AdvancePolicy, ImportError, LateAdmission};
pub use models::{
    BracketMatch, MatchId, Participant, ParticipantId, Refusal, RoundResolution, Tournament,
    TournamentId, DEFAULT_AFFILIATION,
};

//! `BracketEngine`: the single owner and writer of a tournament.
//!
//! All mutation goes through the methods here. Consumers get a shared view with
//! [`BracketEngine::tournament`] or an owned copy with [`BracketEngine::snapshot`]; neither can
//! reach back into engine state. The engine itself is synchronous; callers sharing it across
//! threads must serialize access (the web server keeps it behind a lock).

use crate::logic::{self, AdvancePolicy, ImportError, LateAdmission};
use crate::models::{BracketMatch, MatchId, Participant, ParticipantId, Refusal, Tournament};
use rand::Rng;
use std::io::Read;

#[derive(Debug, Default)]
pub struct BracketEngine {
    tournament: Tournament,
}

impl BracketEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only view of the current state.
    pub fn tournament(&self) -> &Tournament {
        &self.tournament
    }

    /// Owned copy of the current state, detached from the engine.
    pub fn snapshot(&self) -> Tournament {
        self.tournament.clone()
    }

    pub fn is_started(&self) -> bool {
        self.tournament.started
    }

    /// Register a participant; after start this also places them in round 1.
    pub fn register_participant(
        &mut self,
        name: &str,
        affiliation: Option<&str>,
    ) -> Result<Participant, Refusal> {
        logic::register_participant(&mut self.tournament, name, affiliation)
            .map(|(participant, _)| participant)
            .inspect_err(|e| log::debug!("register_participant refused: {}", e))
    }

    /// Like [`register_participant`](Self::register_participant), also reporting where a late
    /// joiner was placed.
    pub fn register_with_admission(
        &mut self,
        name: &str,
        affiliation: Option<&str>,
    ) -> Result<(Participant, Option<LateAdmission>), Refusal> {
        logic::register_participant(&mut self.tournament, name, affiliation)
            .inspect_err(|e| log::debug!("register_participant refused: {}", e))
    }

    pub fn remove_participant(&mut self, id: ParticipantId) -> Result<Participant, Refusal> {
        logic::remove_participant(&mut self.tournament, id)
            .inspect_err(|e| log::debug!("remove_participant refused: {}", e))
    }

    /// Draw round 1 with the thread-local RNG.
    pub fn start_tournament(&mut self) -> Result<Vec<BracketMatch>, Refusal> {
        self.start_tournament_with(&mut rand::thread_rng())
    }

    /// Draw round 1 with a caller-supplied RNG.
    pub fn start_tournament_with<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<Vec<BracketMatch>, Refusal> {
        let round_1 = logic::start_tournament(&mut self.tournament, rng)
            .inspect_err(|e| log::debug!("start_tournament refused: {}", e))?;
        log::info!(
            "Tournament {} started: {} participants, {} round-1 match(es)",
            self.tournament.id,
            self.tournament.roster.len(),
            round_1.len()
        );
        Ok(round_1)
    }

    /// Place an already registered participant into round 1 of the running bracket.
    pub fn admit_late_joiner(&mut self, id: ParticipantId) -> Result<LateAdmission, Refusal> {
        logic::admit_late_joiner(&mut self.tournament, id)
            .inspect_err(|e| log::debug!("admit_late_joiner refused: {}", e))
    }

    pub fn declare_winner(
        &mut self,
        match_id: MatchId,
        participant: ParticipantId,
    ) -> Result<BracketMatch, Refusal> {
        logic::declare_winner(&mut self.tournament, match_id, participant)
            .inspect_err(|e| log::debug!("declare_winner refused: {}", e))
    }

    /// Advance with unresolved matches forfeited.
    pub fn advance_round(&mut self) -> Result<Vec<BracketMatch>, Refusal> {
        self.advance_round_with(AdvancePolicy::Forfeit)
    }

    pub fn advance_round_with(
        &mut self,
        policy: AdvancePolicy,
    ) -> Result<Vec<BracketMatch>, Refusal> {
        logic::advance_round(&mut self.tournament, policy)
            .inspect_err(|e| log::debug!("advance_round refused: {}", e))
    }

    /// Discard the bracket and return to registration with the same roster.
    pub fn restart(&mut self) -> Result<(), Refusal> {
        logic::restart_tournament(&mut self.tournament)?;
        log::info!("Tournament {} restarted", self.tournament.id);
        Ok(())
    }

    pub fn import_roster<R: Read>(&mut self, reader: R) -> Result<Vec<Participant>, ImportError> {
        let registered = logic::import_roster(&mut self.tournament, reader)?;
        log::info!(
            "Imported {} participant(s) into tournament {}",
            registered.len(),
            self.tournament.id
        );
        Ok(registered)
    }
}

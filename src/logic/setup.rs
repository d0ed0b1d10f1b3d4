//! Registration phase: add/remove participants, draw round 1, restart.

use crate::logic::late_join::{admit_late_joiner, LateAdmission};
use crate::logic::rounds::pair_into_round;
use crate::models::{BracketMatch, Participant, ParticipantId, Refusal, Tournament};
use rand::seq::SliceRandom;
use rand::Rng;

/// Register a participant. Once the bracket is drawn the newcomer is admitted into round 1 in
/// the same call.
pub fn register_participant(
    tournament: &mut Tournament,
    name: &str,
    affiliation: Option<&str>,
) -> Result<(Participant, Option<LateAdmission>), Refusal> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Refusal::EmptyName);
    }
    let participant = Participant::new(name, affiliation);
    tournament.roster.push(participant.clone());

    let admission = if tournament.started {
        Some(admit_late_joiner(tournament, participant.id)?)
    } else {
        None
    };
    Ok((participant, admission))
}

/// Remove a participant by id (only before the bracket is drawn).
pub fn remove_participant(
    tournament: &mut Tournament,
    participant_id: ParticipantId,
) -> Result<Participant, Refusal> {
    if tournament.started {
        return Err(Refusal::AlreadyStarted);
    }
    let idx = tournament
        .roster
        .iter()
        .position(|p| p.id == participant_id)
        .ok_or(Refusal::ParticipantNotFound(participant_id))?;
    Ok(tournament.roster.remove(idx))
}

/// Draw round 1: uniform shuffle of the roster, consecutive pairs, a bye at the end if odd.
pub fn start_tournament<R: Rng + ?Sized>(
    tournament: &mut Tournament,
    rng: &mut R,
) -> Result<Vec<BracketMatch>, Refusal> {
    if tournament.started {
        return Err(Refusal::AlreadyStarted);
    }
    if tournament.roster.len() < 2 {
        return Err(Refusal::NotEnoughParticipants {
            registered: tournament.roster.len(),
        });
    }

    let mut order: Vec<ParticipantId> = tournament.roster.iter().map(|p| p.id).collect();
    order.shuffle(rng);

    tournament.matches.clear();
    let round_1 = pair_into_round(tournament, 1, &order);
    tournament.started = true;
    Ok(round_1)
}

/// Restart: back to registration with the same roster and no matches.
pub fn restart_tournament(tournament: &mut Tournament) -> Result<(), Refusal> {
    if !tournament.started {
        return Err(Refusal::NotStarted);
    }
    tournament.clear_bracket();
    Ok(())
}

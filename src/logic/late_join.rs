//! Admitting participants into a bracket that is already running.
//!
//! Late joiners always enter at round 1. An open bye (round 1, no opponent, no winner) is
//! filled first; otherwise the joiner gets a fresh round-1 bye of their own. Rounds 2 and up
//! are never touched, so a joiner who arrives after round 1 has been advanced will not play.

use crate::models::{BracketMatch, MatchId, ParticipantId, Refusal, Tournament};
use serde::{Deserialize, Serialize};

/// Where a late joiner ended up.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "match_id")]
pub enum LateAdmission {
    /// Took the empty slot of an existing round-1 bye.
    FilledBye(MatchId),
    /// Got a new round-1 match with no opponent yet.
    NewBye(MatchId),
}

impl LateAdmission {
    pub fn match_id(&self) -> MatchId {
        match self {
            LateAdmission::FilledBye(id) | LateAdmission::NewBye(id) => *id,
        }
    }
}

/// Place a registered participant into round 1 of a started bracket.
pub fn admit_late_joiner(
    tournament: &mut Tournament,
    participant_id: ParticipantId,
) -> Result<LateAdmission, Refusal> {
    if !tournament.started {
        return Err(Refusal::NotStarted);
    }
    if tournament.participant(participant_id).is_none() {
        return Err(Refusal::ParticipantNotFound(participant_id));
    }
    if tournament.is_in_bracket(participant_id) {
        return Err(Refusal::AlreadyInBracket(participant_id));
    }

    let open_bye = tournament
        .matches
        .iter_mut()
        .find(|m| m.round == 1 && m.slot_b.is_none() && m.winner.is_none());

    let admission = match open_bye {
        Some(m) => {
            m.slot_b = Some(participant_id);
            LateAdmission::FilledBye(m.id)
        }
        None => {
            let id = tournament.next_match_id(1);
            tournament
                .matches
                .push(BracketMatch::new(id, participant_id, None));
            LateAdmission::NewBye(id)
        }
    };
    log::info!(
        "Late joiner {} admitted to round 1 ({:?})",
        participant_id,
        admission
    );
    Ok(admission)
}

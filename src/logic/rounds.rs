//! Playing the bracket: declaring winners and advancing to the next round.

use crate::models::{
    BracketMatch, MatchId, ParticipantId, Refusal, RoundResolution, Tournament,
};
use serde::{Deserialize, Serialize};

/// What to do with matches of the current round that have no winner when advancing.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvancePolicy {
    /// Leave both participants out of the next round.
    #[default]
    Forfeit,
    /// Refuse to advance while any match is unresolved.
    Strict,
}

/// Pair `participants` in order into matches of `round`: (0,1), (2,3), ... with a bye last if odd.
/// The new matches are appended to the tournament and returned.
pub(crate) fn pair_into_round(
    tournament: &mut Tournament,
    round: u32,
    participants: &[ParticipantId],
) -> Vec<BracketMatch> {
    let created: Vec<BracketMatch> = participants
        .chunks(2)
        .map(|pair| {
            let id = tournament.next_match_id(round);
            BracketMatch::new(id, pair[0], pair.get(1).copied())
        })
        .collect();
    tournament.matches.extend(created.iter().cloned());
    created
}

/// Record the winner of a match. A decided match stays decided; declaring again is refused.
pub fn declare_winner(
    tournament: &mut Tournament,
    match_id: MatchId,
    participant: ParticipantId,
) -> Result<BracketMatch, Refusal> {
    let m = tournament
        .find_match_mut(match_id)
        .ok_or(Refusal::MatchNotFound(match_id))?;
    if m.is_decided() {
        return Err(Refusal::AlreadyDecided(match_id));
    }
    if !m.involves(participant) {
        return Err(Refusal::NotInMatch {
            match_id,
            participant,
        });
    }
    m.winner = Some(participant);
    Ok(m.clone())
}

/// Create the next round from the participants resolved in the current (highest) round.
///
/// Under [`AdvancePolicy::Forfeit`] unresolved matches simply contribute nobody. Either way at
/// least 2 resolved participants are needed.
pub fn advance_round(
    tournament: &mut Tournament,
    policy: AdvancePolicy,
) -> Result<Vec<BracketMatch>, Refusal> {
    let current = tournament.current_round().ok_or(Refusal::NotStarted)?;

    let resolutions = tournament.round_resolutions(current);
    let advancing: Vec<ParticipantId> = resolutions
        .iter()
        .filter_map(|(_, r)| match r {
            RoundResolution::Advances(id) => Some(*id),
            RoundResolution::Unresolved => None,
        })
        .collect();

    let unresolved = resolutions.len() - advancing.len();
    let incomplete = advancing.len() < 2 || (policy == AdvancePolicy::Strict && unresolved > 0);
    if incomplete {
        return Err(Refusal::RoundIncomplete {
            round: current,
            resolved: advancing.len(),
        });
    }
    if unresolved > 0 {
        log::info!(
            "Round {}: {} unresolved match(es) forfeited on advance",
            current,
            unresolved
        );
    }

    let next = pair_into_round(tournament, current + 1, &advancing);
    log::info!(
        "Advanced to round {} with {} participant(s) in {} match(es)",
        current + 1,
        advancing.len(),
        next.len()
    );
    Ok(next)
}

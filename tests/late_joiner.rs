//! Integration tests for admitting participants into a running bracket.

use bowling_bracket::{BracketEngine, LateAdmission, MatchId, Refusal};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

fn started(n: usize) -> BracketEngine {
    let mut engine = BracketEngine::new();
    for i in 0..n {
        engine.register_participant(&format!("P{i}"), None).unwrap();
    }
    engine
        .start_tournament_with(&mut StdRng::seed_from_u64(n as u64))
        .unwrap();
    engine
}

#[test]
fn registration_before_start_is_not_an_admission() {
    let mut engine = BracketEngine::new();
    let (p, admission) = engine.register_with_admission("Early", None).unwrap();
    assert_eq!(admission, None);
    assert!(!engine.tournament().is_in_bracket(p.id));
    assert_eq!(engine.admit_late_joiner(p.id), Err(Refusal::NotStarted));
}

#[test]
fn late_joiner_fills_the_open_bye() {
    let mut engine = started(3);
    let bye = engine.tournament().matches[1].clone();
    assert!(bye.is_bye());

    let (late, admission) = engine.register_with_admission("Late", Some("XDC")).unwrap();

    assert_eq!(admission, Some(LateAdmission::FilledBye(bye.id)));
    assert_eq!(engine.tournament().matches.len(), 2);
    let filled = engine.tournament().find_match(bye.id).unwrap();
    assert_eq!(filled.slot_a, bye.slot_a);
    assert_eq!(filled.slot_b, Some(late.id));
    assert!(!filled.is_bye());
}

#[test]
fn late_joiner_without_open_bye_gets_a_new_one() {
    let mut engine = started(4);
    let (e, admission) = engine.register_with_admission("E", None).unwrap();

    let new_id = match admission {
        Some(LateAdmission::NewBye(id)) => id,
        other => panic!("expected a new bye, got {other:?}"),
    };
    assert_eq!(engine.tournament().matches.len(), 3);
    let created = engine.tournament().find_match(new_id).unwrap();
    assert_eq!(created.round, 1);
    assert_eq!(created.slot_a, e.id);
    assert!(created.is_bye());

    // The next joiner takes that bye instead of opening another.
    let (f, admission) = engine.register_with_admission("F", None).unwrap();
    assert_eq!(admission, Some(LateAdmission::FilledBye(new_id)));
    assert_eq!(engine.tournament().matches.len(), 3);
    assert_eq!(
        engine.tournament().find_match(new_id).unwrap().slot_b,
        Some(f.id)
    );
}

#[test]
fn decided_bye_is_not_reopened() {
    let mut engine = started(3);
    let bye = engine.tournament().matches[1].clone();
    engine.declare_winner(bye.id, bye.slot_a).unwrap();

    let (_, admission) = engine.register_with_admission("Late", None).unwrap();
    assert!(matches!(admission, Some(LateAdmission::NewBye(_))));
    assert_eq!(engine.tournament().matches.len(), 3);
    assert!(engine.tournament().find_match(bye.id).unwrap().is_bye());
}

#[test]
fn filled_bye_must_now_be_played() {
    let mut engine = started(3);
    let live = engine.tournament().matches[0].clone();
    engine.register_participant("Late", None).unwrap();
    engine.declare_winner(live.id, live.slot_a).unwrap();

    assert_eq!(
        engine.advance_round(),
        Err(Refusal::RoundIncomplete {
            round: 1,
            resolved: 1,
        })
    );
}

#[test]
fn late_joiners_only_ever_enter_round_one() {
    let mut engine = started(4);
    for m in engine.tournament().matches.clone() {
        engine.declare_winner(m.id, m.slot_a).unwrap();
    }
    let round_2 = engine.advance_round().unwrap();

    let (late, admission) = engine.register_with_admission("Too Late", None).unwrap();
    let placed = admission.unwrap().match_id();
    assert_eq!(placed.round, 1);
    assert_eq!(engine.tournament().current_round(), Some(2));
    assert_eq!(
        engine.tournament().matches_in_round(2).cloned().collect::<Vec<_>>(),
        round_2
    );

    engine.declare_winner(round_2[0].id, round_2[0].slot_a).unwrap();
    assert_eq!(engine.tournament().champion(), Some(round_2[0].slot_a));
    assert!(!engine
        .tournament()
        .matches
        .iter()
        .any(|m| m.round > 1 && m.involves(late.id)));
}

#[test]
fn admitting_twice_or_unknown_is_refused() {
    let mut engine = started(4);
    let placed = engine.tournament().matches[0].slot_a;
    assert_eq!(
        engine.admit_late_joiner(placed),
        Err(Refusal::AlreadyInBracket(placed))
    );

    let stranger = uuid::Uuid::new_v4();
    assert_eq!(
        engine.admit_late_joiner(stranger),
        Err(Refusal::ParticipantNotFound(stranger))
    );
}

#[test]
fn late_matches_get_unique_ids() {
    let mut engine = started(4);
    for i in 0..6 {
        engine.register_participant(&format!("Late {i}"), None).unwrap();
    }
    let ids: HashSet<MatchId> = engine.tournament().matches.iter().map(|m| m.id).collect();
    assert_eq!(ids.len(), engine.tournament().matches.len());
    // 4 drawn + 6 late = 10 players over 5 round-1 matches, none of them a bye.
    assert_eq!(engine.tournament().matches.len(), 5);
    assert!(engine.tournament().matches.iter().all(|m| !m.is_bye()));
}

#[test]
fn late_joiner_cannot_be_removed() {
    let mut engine = started(2);
    let late = engine.register_participant("Late", None).unwrap();
    assert_eq!(
        engine.remove_participant(late.id),
        Err(Refusal::AlreadyStarted)
    );
    assert!(engine.tournament().participant(late.id).is_some());
}

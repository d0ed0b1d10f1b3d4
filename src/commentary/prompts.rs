//! Prompt construction and nickname cleanup.

use crate::models::{MatchId, Tournament};

/// Prompt for a bowling / crypto themed nickname. None if `name` is blank.
pub fn nickname_prompt(name: &str, affiliation: Option<&str>) -> Option<String> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    let context = match affiliation.map(str::trim).filter(|a| !a.is_empty()) {
        Some(a) => format!("who works at {}", a),
        None => "who is a tech enthusiast".to_string(),
    };
    Some(format!(
        "Come up with a short, punchy bowling-themed or crypto-themed nickname for \"{}\" {}. \
         Reply with the nickname only, e.g. \"The Block Striker\" or \"Gutter Guardian\".",
        name, context
    ))
}

/// Announcer-style hype prompt for a live match. None for byes and unknown matches.
pub fn match_hype_prompt(tournament: &Tournament, match_id: MatchId) -> Option<String> {
    let m = tournament.find_match(match_id)?;
    let a = tournament.participant(m.slot_a)?;
    let b = tournament.participant(m.slot_b?)?;
    Some(format!(
        "Give a two-sentence, high-energy sports announcer intro for a round {} bowling match \
         between {} and {}. Throw in bowling or crypto puns and stay under 40 words.",
        m.round,
        a.introduction(),
        b.introduction()
    ))
}

/// Trim whitespace and drop one leading and one trailing quote mark.
pub fn clean_nickname(raw: &str) -> String {
    let trimmed = raw.trim();
    let trimmed = trimmed
        .strip_prefix(['"', '\''])
        .unwrap_or(trimmed);
    let trimmed = trimmed
        .strip_suffix(['"', '\''])
        .unwrap_or(trimmed);
    trimmed.to_string()
}

/// `Name "Nickname"`, the display name to register with.
pub fn compose_nickname(name: &str, nickname: &str) -> String {
    format!("{} \"{}\"", name.trim(), clean_nickname(nickname))
}

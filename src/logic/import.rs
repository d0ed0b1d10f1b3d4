//! Bulk registration from a CSV roster (`name,affiliation`, header row required).

use crate::logic::setup::register_participant;
use crate::models::{Participant, Refusal, Tournament};
use serde::Deserialize;
use std::io::Read;

/// Errors while importing a roster.
#[derive(Debug)]
pub enum ImportError {
    Csv(csv::Error),
}

impl std::fmt::Display for ImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportError::Csv(e) => write!(f, "Could not read roster CSV: {}", e),
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImportError::Csv(e) => Some(e),
        }
    }
}

impl From<csv::Error> for ImportError {
    fn from(e: csv::Error) -> Self {
        ImportError::Csv(e)
    }
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    name: String,
    #[serde(default)]
    affiliation: Option<String>,
}

/// Register every row of the CSV. Rows with a blank name are skipped. The whole file is parsed
/// before anyone is registered, so a malformed file registers nobody.
pub fn import_roster<R: Read>(
    tournament: &mut Tournament,
    reader: R,
) -> Result<Vec<Participant>, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let rows = csv_reader
        .deserialize::<RosterRow>()
        .collect::<Result<Vec<_>, _>>()?;

    let mut registered = Vec::with_capacity(rows.len());
    for row in rows {
        match register_participant(tournament, &row.name, row.affiliation.as_deref()) {
            Ok((participant, _)) => registered.push(participant),
            Err(Refusal::EmptyName) => log::debug!("Skipping roster row with empty name"),
            Err(e) => log::warn!("Skipping roster row {:?}: {}", row.name, e),
        }
    }
    Ok(registered)
}

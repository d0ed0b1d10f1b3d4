//! Bracket business logic: registration, late admission, rounds, roster import.

mod import;
mod late_join;
mod rounds;
mod setup;

pub use import::{import_roster, ImportError};
pub use late_join::{admit_late_joiner, LateAdmission};
pub use rounds::{advance_round, declare_winner, AdvancePolicy};
pub use setup::{register_participant, remove_participant, restart_tournament, start_tournament};

//! # PathSim Core
//!
//! Game rules for the pathology diagnosis simulator.
//!
//! A round hides one case from the [`CaseCatalog`]; the player spends a limited number of
//! tickets ordering immunohistochemistry markers from the panel, then commits to a single
//! diagnosis. This crate holds:
//! - The catalog, its YAML format and shape validation
//! - The [`GameSession`] state machine and intent dispatch
//! - Read-only snapshots for whatever draws the screen
//!
//! **No presentation concerns**: terminal rendering, argument parsing and environment handling
//! belong to the binaries.

pub mod catalog;
pub mod config;
pub mod constants;
pub mod error;
pub mod intent;
pub mod session;
pub mod snapshot;
pub mod validation;
mod wire;

pub use catalog::{Case, CaseCatalog, MarkerPanel};
pub use config::QuizConfig;
pub use error::{QuizError, QuizResult};
pub use intent::{Intent, IntentOutcome};
pub use session::{GameSession, Reveal, Status};
pub use snapshot::SessionSnapshot;

pub use pathsim_types::{CaseId, MarkerName, TextError};

//! Catalog shape validation.
//!
//! This module checks the cross-record rules a catalog must satisfy before a session can use
//! it. It does not judge clinical content; it only guarantees that lookups made by the game
//! are well defined.

use crate::catalog::{Case, MarkerPanel};
use crate::{QuizError, QuizResult};
use std::collections::HashSet;

/// Validates a set of cases against the marker panel.
///
/// - Case ids must be unique.
/// - Every marker a case lists must be on the panel, so that no result is unreachable.
///
/// # Errors
///
/// Returns a `QuizError::InvalidCatalog` naming the first offending case.
pub fn validate_catalog(panel: &MarkerPanel, cases: &[Case]) -> QuizResult<()> {
    let mut ids = HashSet::new();

    for case in cases {
        if !ids.insert(case.id.as_str()) {
            return Err(QuizError::InvalidCatalog(format!(
                "case id {} is used more than once",
                case.id
            )));
        }

        if let Some(marker) = case
            .markers
            .iter()
            .map(|(marker, _)| marker)
            .find(|m| !panel.contains(m.as_str())) {
            return Err(QuizError::InvalidCatalog(format!(
                "case {} lists marker {} which is not on the panel",
                case.id, marker
            )));
        }
    }

    Ok(())
}

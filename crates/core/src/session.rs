//! Game session state machine.
//!
//! A [`GameSession`] owns one hidden target at a time and the ticket budget spent on it.
//! Rounds move from `Playing` to exactly one of `Won` or `Lost`; only [`GameSession::start_round`]
//! leaves a terminal state.
//!
//! Intents that cannot apply (a marker already ordered, no tickets left, a finished round,
//! names that are not on the panel or in the catalog) are ignored without error. A view built
//! on top of this only ever offers legal actions, so anything else is treated as noise.

use crate::catalog::{Case, CaseCatalog};
use crate::config::QuizConfig;
use crate::{QuizError, QuizResult};
use pathsim_types::MarkerName;
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Playing,
    Won,
    Lost,
}

impl Status {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Status::Playing)
    }

    /// Banner text shown for the round outcome.
    pub fn headline(self) -> &'static str {
        match self {
            Status::Playing => "Playing",
            Status::Won => "Confirmed Diagnosis",
            Status::Lost => "Incorrect Diagnosis",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Status::Playing => "playing",
            Status::Won => "won",
            Status::Lost => "lost",
        };
        f.write_str(label)
    }
}

/// One marker result the player has paid for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reveal {
    pub marker: MarkerName,
    pub result: String,
}

pub struct GameSession {
    catalog: CaseCatalog,
    rng: Pcg64Mcg,
    ticket_budget: u32,
    round: u64,
    // Index into `catalog`; the catalog is immutable so this stays valid.
    target: usize,
    revealed: Vec<Reveal>,
    tickets_remaining: u32,
    status: Status,
}

impl GameSession {
    /// Create a session and start its first round.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::EmptyCatalog` if the catalog has no cases.
    pub fn new(catalog: CaseCatalog, config: &QuizConfig) -> QuizResult<Self> {
        let mut rng = match config.seed() {
            Some(seed) => Pcg64Mcg::seed_from_u64(seed),
            None => Pcg64Mcg::from_entropy(),
        };
        let target = catalog.random_index(&mut rng)?;

        let mut session = Self {
            catalog,
            rng,
            ticket_budget: config.ticket_budget(),
            round: 0,
            target,
            revealed: Vec::new(),
            tickets_remaining: config.ticket_budget(),
            status: Status::Playing,
        };
        session.begin_round(target);
        Ok(session)
    }

    /// Start a new round with a uniformly random target.
    pub fn start_round(&mut self) {
        // `new` refuses empty catalogs, so this always yields an index.
        let target = self.catalog.random_index(&mut self.rng).unwrap_or(0);
        self.begin_round(target);
    }

    /// Start a new round with a chosen target.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::UnknownCase` if `case_id` is not in the catalog; the current round
    /// is left untouched.
    pub fn start_round_with(&mut self, case_id: &str) -> QuizResult<()> {
        let target = self
            .catalog
            .position(case_id.trim())
            .ok_or_else(|| QuizError::UnknownCase(case_id.to_string()))?;
        self.begin_round(target);
        Ok(())
    }

    fn begin_round(&mut self, target: usize) {
        self.round += 1;
        self.target = target;
        self.revealed.clear();
        self.tickets_remaining = self.ticket_budget;
        self.status = Status::Playing;
        tracing::info!(
            "round {} started with {} tickets",
            self.round,
            self.ticket_budget
        );
    }

    /// Spend a ticket on `marker` and return its result for the current target.
    ///
    /// Returns `None`, changing nothing, if the round is over, no tickets remain, the marker is
    /// not on the panel, or it has already been revealed. Markers the target does not list
    /// report the canonical negative result.
    pub fn reveal_marker(&mut self, marker: &str) -> Option<&str> {
        if !self.can_reveal(marker) {
            tracing::debug!(round = self.round, marker, "ignoring reveal");
            return None;
        }

        let marker = self.catalog.panel().get(marker.trim())?.clone();
        let result = self.target_case().marker_result(marker.as_str()).to_owned();

        self.tickets_remaining -= 1;
        tracing::debug!(
            round = self.round,
            marker = %marker,
            tickets_remaining = self.tickets_remaining,
            "marker revealed"
        );
        self.revealed.push(Reveal { marker, result });
        self.revealed.last().map(|r| r.result.as_str())
    }

    /// Whether [`reveal_marker`](Self::reveal_marker) would spend a ticket on `marker`.
    pub fn can_reveal(&self, marker: &str) -> bool {
        let marker = marker.trim();
        self.status == Status::Playing
            && self.tickets_remaining > 0
            && self.catalog.panel().contains(marker)
            && !self.is_revealed(marker)
    }

    pub fn is_revealed(&self, marker: &str) -> bool {
        self.revealed.iter().any(|r| r.marker.as_str() == marker)
    }

    /// Commit to a diagnosis for the current round.
    ///
    /// The first diagnosis naming a catalog case ends the round: `Won` if it names the target,
    /// `Lost` otherwise. No reveals are required beforehand. Ids outside the catalog and calls
    /// after the round ended are ignored. Returns the status after the call.
    pub fn submit_diagnosis(&mut self, case_id: &str) -> Status {
        if self.status.is_terminal() {
            tracing::debug!(round = self.round, "ignoring diagnosis after round end");
            return self.status;
        }

        let case_id = case_id.trim();
        if self.catalog.find(case_id).is_none() {
            tracing::debug!(round = self.round, case_id, "ignoring diagnosis for unknown case");
            return self.status;
        }

        self.status = if self.target_case().id.as_str() == case_id {
            Status::Won
        } else {
            Status::Lost
        };
        tracing::info!(
            "round {} finished: {} after {} reveals",
            self.round,
            self.status,
            self.revealed.len()
        );
        self.status
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn tickets_remaining(&self) -> u32 {
        self.tickets_remaining
    }

    pub fn ticket_budget(&self) -> u32 {
        self.ticket_budget
    }

    /// Revealed results in the order they were ordered.
    pub fn revealed(&self) -> &[Reveal] {
        &self.revealed
    }

    /// 1-based number of the current round.
    pub fn round(&self) -> u64 {
        self.round
    }

    pub fn catalog(&self) -> &CaseCatalog {
        &self.catalog
    }

    /// The current target, only once the round is over.
    pub fn revealed_target(&self) -> Option<&Case> {
        self.status.is_terminal().then(|| self.target_case())
    }

    pub(crate) fn target_case(&self) -> &Case {
        &self.catalog.all_cases()[self.target]
    }
}

impl std::fmt::Debug for GameSession {
    // Keeps the target out of debug output while a round is live.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("round", &self.round)
            .field("status", &self.status)
            .field("tickets_remaining", &self.tickets_remaining)
            .field("revealed", &self.revealed)
            .field("target", &self.revealed_target().map(|c| c.id.as_str()))
            .finish()
    }
}

//! Intent dispatch.
//!
//! Views translate user actions into [`Intent`]s and hand them to [`GameSession::apply`]; the
//! returned [`IntentOutcome`] says what, if anything, happened so the view can report it.

use crate::session::{GameSession, Status};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", content = "value", rename_all = "snake_case")]
pub enum Intent {
    StartRound,
    Reveal(String),
    Diagnose(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum IntentOutcome {
    RoundStarted { round: u64 },
    Revealed { marker: String, result: String, tickets_remaining: u32 },
    Diagnosed { status: Status },
    /// The intent did not apply to the current state and changed nothing.
    Ignored,
}

impl GameSession {
    pub fn apply(&mut self, intent: Intent) -> IntentOutcome {
        match intent {
            Intent::StartRound => {
                self.start_round();
                IntentOutcome::RoundStarted {
                    round: self.round(),
                }
            }
            Intent::Reveal(marker) => {
                let result = self.reveal_marker(&marker).map(str::to_owned);
                match result {
                    Some(result) => IntentOutcome::Revealed {
                        marker: marker.trim().to_string(),
                        result,
                        tickets_remaining: self.tickets_remaining(),
                    },
                    None => IntentOutcome::Ignored,
                }
            }
            Intent::Diagnose(case_id) => {
                let before = self.status();
                let after = self.submit_diagnosis(&case_id);
                if before == after {
                    IntentOutcome::Ignored
                } else {
                    IntentOutcome::Diagnosed { status: after }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CaseCatalog;
    use crate::config::QuizConfig;

    fn session_targeting(case_id: &str) -> GameSession {
        let config = QuizConfig::new(8, Some(4), None).unwrap();
        let mut session = GameSession::new(CaseCatalog::builtin().unwrap(), &config).unwrap();
        session.start_round_with(case_id).unwrap();
        session
    }

    #[test]
    fn test_apply_reveal_reports_result() {
        let mut session = session_targeting("ALCL_ALK_POS");
        let outcome = session.apply(Intent::Reveal("ALK-1".into()));
        assert_eq!(
            outcome,
            IntentOutcome::Revealed {
                marker: "ALK-1".into(),
                result: "+(Nuclear & Cyto)".into(),
                tickets_remaining: 7,
            }
        );
        assert_eq!(session.apply(Intent::Reveal("ALK-1".into())), IntentOutcome::Ignored);
    }

    #[test]
    fn test_apply_diagnose_then_ignore() {
        let mut session = session_targeting("ENKTL");
        assert_eq!(
            session.apply(Intent::Diagnose("ENKTL".into())),
            IntentOutcome::Diagnosed { status: Status::Won }
        );
        assert_eq!(session.apply(Intent::Diagnose("AITL".into())), IntentOutcome::Ignored);
        assert_eq!(session.status(), Status::Won);
    }

    #[test]
    fn test_apply_unknown_case_is_ignored() {
        let mut session = session_targeting("ENKTL");
        assert_eq!(session.apply(Intent::Diagnose("HL".into())), IntentOutcome::Ignored);
        assert_eq!(session.status(), Status::Playing);
    }

    #[test]
    fn test_apply_start_round() {
        let mut session = session_targeting("ENKTL");
        session.apply(Intent::Diagnose("AITL".into()));
        assert_eq!(session.apply(Intent::StartRound), IntentOutcome::RoundStarted { round: 3 });
        assert_eq!(session.status(), Status::Playing);
    }

    #[test]
    fn test_intent_json_shape() {
        let intent: Intent =
            serde_json::from_str(r#"{"intent":"reveal","value":"CD30"}"#).unwrap();
        assert_eq!(intent, Intent::Reveal("CD30".into()));
        let start: Intent = serde_json::from_str(r#"{"intent":"start_round"}"#).unwrap();
        assert_eq!(start, Intent::StartRound);
    }
}

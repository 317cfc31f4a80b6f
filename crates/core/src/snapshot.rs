use crate::constants::POSITIVE_SIGN;
use crate::session::{GameSession, Status};
use serde::Serialize;

// Read-only view of a session for rendering. While a round is live it carries only the
// clinical presentation; the diagnosis and unordered marker results stay inside the session.

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub round: u64,
    pub case: CaseBrief,
    pub panel: Vec<PanelEntry>,
    pub revealed: Vec<RevealedMarker>,
    pub tickets_remaining: u32,
    pub ticket_budget: u32,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,
    pub choices: Vec<DiagnosisChoice>,
}

/// Fields of the target that are visible from the start of a round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CaseBrief {
    pub age: String,
    pub gender: String,
    pub site: String,
    pub symptom: String,
    pub imaging_summary: String,
    pub histology_image: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PanelEntry {
    pub marker: String,
    pub revealed: bool,
    pub available: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RevealedMarker {
    pub marker: String,
    pub result: String,
    pub positive: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub correct: bool,
    pub headline: String,
    pub target_id: String,
    pub target_name: String,
    pub target_category: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DiagnosisChoice {
    pub id: String,
    pub name: String,
}

/// Results are highlighted as positive when they contain a `+`, including equivocal ones
/// such as `-/+(Variable)`.
pub fn is_positive(result: &str) -> bool {
    result.contains(POSITIVE_SIGN)
}

impl GameSession {
    pub fn snapshot(&self) -> SessionSnapshot {
        let target = self.target_case();
        let case = CaseBrief {
            age: target.age.clone(),
            gender: target.gender.clone(),
            site: target.site.clone(),
            symptom: target.symptom.clone(),
            imaging_summary: target.imaging_summary.clone(),
            histology_image: target.histology_image.clone(),
        };

        let panel = self
            .catalog()
            .panel()
            .iter()
            .map(|marker| PanelEntry {
                marker: marker.to_string(),
                revealed: self.is_revealed(marker.as_str()),
                available: self.can_reveal(marker.as_str()),
            })
            .collect();

        let revealed = self
            .revealed()
            .iter()
            .map(|r| RevealedMarker {
                marker: r.marker.to_string(),
                result: r.result.clone(),
                positive: is_positive(&r.result),
            })
            .collect();

        let outcome = self.revealed_target().map(|case| Outcome {
            correct: self.status() == Status::Won,
            headline: self.status().headline().to_string(),
            target_id: case.id.to_string(),
            target_name: case.name.clone(),
            target_category: case.category.clone(),
        });

        let choices = self
            .catalog()
            .all_cases()
            .iter()
            .map(|c| DiagnosisChoice {
                id: c.id.to_string(),
                name: c.name.clone(),
            })
            .collect();

        SessionSnapshot {
            round: self.round(),
            case,
            panel,
            revealed,
            tickets_remaining: self.tickets_remaining(),
            ticket_budget: self.ticket_budget(),
            status: self.status(),
            outcome,
            choices,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CaseCatalog;
    use crate::config::QuizConfig;

    fn session_targeting(case_id: &str) -> GameSession {
        let config = QuizConfig::new(8, Some(11), None).unwrap();
        let mut session = GameSession::new(CaseCatalog::builtin().unwrap(), &config).unwrap();
        session.start_round_with(case_id).unwrap();
        session
    }

    #[test]
    fn test_is_positive() {
        assert!(is_positive("+++(Strong/Membranous)"));
        assert!(is_positive("-/+(Variable)"));
        assert!(!is_positive("-(Loss in 75%)"));
        assert!(!is_positive("Negative (-)"));
        assert!(!is_positive("90%"));
    }

    #[test]
    fn test_live_snapshot_shows_presentation_only() {
        let session = session_targeting("ENKTL");
        let snapshot = session.snapshot();

        assert_eq!(snapshot.case.site, "Nasal Cavity");
        assert_eq!(snapshot.case.age, "50s");
        assert_eq!(snapshot.case.histology_image, "/images/enktl_he.jpg");
        assert_eq!(snapshot.status, Status::Playing);
        assert!(snapshot.outcome.is_none());
        assert_eq!(snapshot.choices.len(), 4);
    }

    #[test]
    fn test_live_snapshot_json_never_names_target() {
        let mut session = session_targeting("ENKTL");
        session.reveal_marker("CD3");
        let json = serde_json::to_string(&session.snapshot()).unwrap();

        // The differential list names every case, so check the fields that would single it out.
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value.get("outcome").is_none());
        assert!(value["case"].get("name").is_none());
        assert!(value["case"].get("id").is_none());
        assert!(!json.contains("+++(Diffuse)"));

        let mut keys: Vec<&str> = value["case"]
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            ["age", "gender", "histology_image", "imaging_summary", "site", "symptom"]
        );
    }

    #[test]
    fn test_live_snapshot_hides_category() {
        // Each built-in category belongs to a single case.
        let session = session_targeting("ALCL_ALK_POS");
        let json = serde_json::to_string(&session.snapshot()).unwrap();
        assert!(!json.contains("category"));
        assert!(!json.contains("\"ALCL\""));
    }

    #[test]
    fn test_snapshot_tracks_reveals_and_panel_state() {
        let mut session = session_targeting("ALCL_ALK_POS");
        session.reveal_marker("CD30");
        session.reveal_marker("CD56");
        let snapshot = session.snapshot();

        assert_eq!(snapshot.tickets_remaining, 6);
        assert_eq!(snapshot.revealed.len(), 2);
        assert_eq!(snapshot.revealed[0].marker, "CD30");
        assert!(snapshot.revealed[0].positive);
        assert_eq!(snapshot.revealed[1].result, "Negative (-)");
        assert!(!snapshot.revealed[1].positive);

        let cd30 = snapshot.panel.iter().find(|p| p.marker == "CD30").unwrap();
        assert!(cd30.revealed && !cd30.available);
        let alk = snapshot.panel.iter().find(|p| p.marker == "ALK-1").unwrap();
        assert!(!alk.revealed && alk.available);
    }

    #[test]
    fn test_terminal_snapshot_discloses_target() {
        let mut session = session_targeting("AITL");
        session.submit_diagnosis("PTCL_NOS");
        let snapshot = session.snapshot();

        let outcome = snapshot.outcome.unwrap();
        assert!(!outcome.correct);
        assert_eq!(outcome.headline, "Incorrect Diagnosis");
        assert_eq!(outcome.target_id, "AITL");
        assert_eq!(outcome.target_name, "nTFH lymphoma, angioimmunoblastic type");
        assert_eq!(outcome.target_category, "Nodal TFH");
        assert!(snapshot.panel.iter().all(|p| !p.available));
    }
}

use pathsim_core::constants::NEGATIVE_RESULT;
use pathsim_core::{CaseCatalog, GameSession, Intent, IntentOutcome, QuizConfig, Status};

const ALT_CATALOG: &str = r#"
panel: [CD3, CD20, CD30]
cases:
  - id: HL
    category: Hodgkin
    site: Mediastinum
    name: Classic Hodgkin lymphoma
    age: "22"
    gender: Female
    symptom: Anterior mediastinal mass.
    imaging_summary: Bulky mediastinal uptake.
    histology_image: /images/chl_he.jpg
    markers:
      CD30: "+"
  - id: DLBCL
    category: Large B-cell
    site: Lymph Node
    name: Diffuse large B-cell lymphoma
    age: "70"
    gender: Male
    symptom: Rapidly growing neck mass.
    imaging_summary: Single bulky nodal mass.
    histology_image: /images/dlbcl_he.jpg
    markers:
      CD20: "+"
"#;

fn seeded(seed: u64, budget: u32) -> QuizConfig {
    QuizConfig::new(budget, Some(seed), None).unwrap()
}

#[test]
fn full_round_through_intents() {
    let mut session = GameSession::new(CaseCatalog::builtin().unwrap(), &seeded(8, 8)).unwrap();
    session.start_round_with("ALCL_ALK_POS").unwrap();

    let outcome = session.apply(Intent::Reveal("CD30".into()));
    assert!(matches!(outcome, IntentOutcome::Revealed { tickets_remaining: 7, .. }));

    let outcome = session.apply(Intent::Reveal("CD56".into()));
    assert!(
        matches!(outcome, IntentOutcome::Revealed { ref result, tickets_remaining: 6, .. } if result == NEGATIVE_RESULT)
    );

    assert_eq!(
        session.apply(Intent::Diagnose("ALCL_ALK_POS".into())),
        IntentOutcome::Diagnosed { status: Status::Won }
    );

    let snapshot = session.snapshot();
    assert_eq!(snapshot.outcome.unwrap().headline, "Confirmed Diagnosis");
}

#[test]
fn every_round_ends_in_exactly_one_terminal_state() {
    let mut session = GameSession::new(CaseCatalog::builtin().unwrap(), &seeded(31, 8)).unwrap();
    let ids: Vec<String> = session
        .catalog()
        .all_cases()
        .iter()
        .map(|c| c.id.to_string())
        .collect();

    for round in 0..40 {
        session.start_round();
        let guess = &ids[round % ids.len()];
        let status = session.submit_diagnosis(guess);
        assert!(status.is_terminal());

        let target = session.revealed_target().unwrap().id.to_string();
        assert_eq!(status == Status::Won, &target == guess);
    }
}

#[test]
fn custom_catalog_drives_session() {
    let catalog = CaseCatalog::from_yaml_str(ALT_CATALOG).unwrap();
    let mut session = GameSession::new(catalog, &seeded(5, 2)).unwrap();
    session.start_round_with("HL").unwrap();

    // CD56 is on the hospital panel but not this one.
    assert_eq!(session.reveal_marker("CD56"), None);
    assert_eq!(session.reveal_marker("CD30"), Some("+"));
    assert_eq!(session.reveal_marker("CD20"), Some(NEGATIVE_RESULT));
    assert_eq!(session.reveal_marker("CD3"), None);
    assert_eq!(session.tickets_remaining(), 0);

    assert_eq!(session.submit_diagnosis("DLBCL"), Status::Lost);
}

#[test]
fn catalog_with_marker_off_panel_is_rejected() {
    let yaml = ALT_CATALOG.replace("CD20: \"+\"", "PAX5: \"+\"");
    let err = CaseCatalog::from_yaml_str(&yaml).expect_err("PAX5 is not on the panel");
    assert!(err.is_configuration_error());
    assert!(err.to_string().contains("PAX5"));
}

//! Terminal rendering and command parsing.
//!
//! Everything here is a pure function of a [`SessionSnapshot`] or an input line; the game
//! rules stay in `pathsim_core`.

use pathsim_core::snapshot::{DiagnosisChoice, SessionSnapshot};
use std::fmt;

const RULE: &str = "------------------------------------------------------------";

/// A parsed line of player input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Test(String),
    Diagnose(String),
    Next,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    if line.is_empty() {
        return Command::Empty;
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match (word.to_ascii_lowercase().as_str(), rest) {
        ("test" | "t" | "run", arg) if !arg.is_empty() => Command::Test(arg.to_string()),
        ("dx" | "diagnose" | "d", arg) if !arg.is_empty() => Command::Diagnose(arg.to_string()),
        ("next" | "n", "") => Command::Next,
        ("help" | "h" | "?", "") => Command::Help,
        ("quit" | "q" | "exit", "") => Command::Quit,
        _ => Command::Unknown(line.to_string()),
    }
}

/// Map a diagnosis argument to a case id: a 1-based position in the differential list, an
/// exact id, or an id typed in any case.
pub fn resolve_diagnosis(arg: &str, choices: &[DiagnosisChoice]) -> Option<String> {
    let arg = arg.trim();
    if let Ok(position) = arg.parse::<usize>() {
        return position
            .checked_sub(1)
            .and_then(|index| choices.get(index))
            .map(|c| c.id.clone());
    }

    choices
        .iter()
        .find(|c| c.id == arg)
        .or_else(|| choices.iter().find(|c| c.id.eq_ignore_ascii_case(arg)))
        .map(|c| c.id.clone())
}

pub const HELP: &str = "\
Commands:
  test <marker>   order an IHC marker (costs one ticket)   e.g. test CD30
  dx <n|id>       commit to a diagnosis from the list      e.g. dx 3
  next            start the next case once this one is decided
  help            show this help
  quit            leave the simulator";

/// Full-screen text rendering of a snapshot.
pub struct Screen<'a>(pub &'a SessionSnapshot);

impl fmt::Display for Screen<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.0;

        writeln!(f, "{RULE}")?;
        writeln!(
            f,
            "PATHOLOGY SIMULATOR | Hospital Panel Mode    case {}    Lab Tickets: {}/{}",
            s.round, s.tickets_remaining, s.ticket_budget
        )?;
        writeln!(f, "{RULE}")?;
        writeln!(f, "Patient   {}/ {}", s.case.age, s.case.gender)?;
        writeln!(f, "Site      {}", s.case.site)?;
        writeln!(f, "Clinical  {}", s.case.symptom)?;
        writeln!(f, "PET-CT    {}", s.case.imaging_summary)?;
        writeln!(f, "H&E       {}", s.case.histology_image)?;
        writeln!(f)?;

        writeln!(f, "IHC panel")?;
        for chunk in s.panel.chunks(5) {
            let row: Vec<String> = chunk
                .iter()
                .map(|entry| {
                    let mark = if entry.revealed {
                        'x'
                    } else if entry.available {
                        ' '
                    } else {
                        '-'
                    };
                    format!("[{mark}] {:<11}", entry.marker)
                })
                .collect();
            writeln!(f, "  {}", row.join(" ").trim_end())?;
        }
        writeln!(f)?;

        writeln!(f, "IHC results")?;
        if s.revealed.is_empty() {
            writeln!(f, "  Select markers to run IHC...")?;
        }
        for r in &s.revealed {
            let sign = if r.positive { '+' } else { ' ' };
            writeln!(f, "  {sign} {:<12} {}", r.marker, r.result)?;
        }
        writeln!(f)?;

        writeln!(f, "Differential diagnosis")?;
        for (index, choice) in s.choices.iter().enumerate() {
            writeln!(f, "  {}. {}", index + 1, choice.name)?;
        }

        if let Some(outcome) = &s.outcome {
            writeln!(f, "{RULE}")?;
            writeln!(f, "{}", outcome.headline.to_uppercase())?;
            writeln!(f, "Target: {} ({})", outcome.target_name, outcome.target_category)?;
            writeln!(f, "Type 'next' for the next case.")?;
        }
        write!(f, "{RULE}")
    }
}

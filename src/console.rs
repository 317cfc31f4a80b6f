//! Interactive loop: render, read a command, forward it to the session.

use crate::view::{parse_command, resolve_diagnosis, Command, Screen, HELP};
use pathsim_core::{GameSession, Intent, IntentOutcome, Status};
use std::io::{self, BufRead, Write};

/// Drive `session` from `input` until the player quits or input ends.
pub fn run<R: BufRead, W: Write>(
    session: &mut GameSession,
    input: R,
    mut output: W,
) -> io::Result<()> {
    writeln!(output, "{}", Screen(&session.snapshot()))?;
    write!(output, "> ")?;
    output.flush()?;

    for line in input.lines() {
        let line = line?;
        let message = match parse_command(&line) {
            Command::Quit => break,
            Command::Empty => None,
            Command::Help => Some(HELP.to_string()),
            Command::Unknown(text) => Some(format!("Unknown command '{}'. Type 'help'.", text)),
            Command::Test(input) => Some(order_marker(session, &input)),
            Command::Diagnose(arg) => Some(diagnose(session, &arg)),
            Command::Next => Some(next_case(session)),
        };

        writeln!(output)?;
        writeln!(output, "{}", Screen(&session.snapshot()))?;
        if let Some(message) = message {
            writeln!(output, "{}", message)?;
        }
        write!(output, "> ")?;
        output.flush()?;
    }

    writeln!(output)?;
    Ok(())
}

fn order_marker(session: &mut GameSession, input: &str) -> String {
    let Some(marker) = session.catalog().panel().resolve(input).map(ToString::to_string) else {
        return format!("'{}' is not on the panel.", input.trim());
    };

    match session.apply(Intent::Reveal(marker.clone())) {
        IntentOutcome::Revealed { result, .. } => format!("{}: {}", marker, result),
        _ if session.status().is_terminal() => "This case is closed. Type 'next'.".to_string(),
        _ if session.is_revealed(&marker) => format!("{} has already been run.", marker),
        _ => "No lab tickets left. Make your diagnosis.".to_string(),
    }
}

fn diagnose(session: &mut GameSession, arg: &str) -> String {
    let choices = session.snapshot().choices;
    let Some(case_id) = resolve_diagnosis(arg, &choices) else {
        return format!("'{}' is not in the differential list.", arg.trim());
    };

    match session.apply(Intent::Diagnose(case_id)) {
        IntentOutcome::Diagnosed { status: Status::Won } => "Well read.".to_string(),
        IntentOutcome::Diagnosed { .. } => "Not this time.".to_string(),
        _ => "This case is closed. Type 'next'.".to_string(),
    }
}

fn next_case(session: &mut GameSession) -> String {
    if !session.status().is_terminal() {
        return "Make a diagnosis before moving on.".to_string();
    }
    session.apply(Intent::StartRound);
    "New case loaded.".to_string()
}

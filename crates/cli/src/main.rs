use clap::{Parser, Subcommand};
use pathsim_core::config::{resolve_catalog, QuizConfig};
use pathsim_core::constants::DEFAULT_TICKET_BUDGET;
use pathsim_core::{CaseCatalog, GameSession, QuizResult, Status};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "pathsim")]
#[command(about = "Pathology simulator catalog and scripted play tool")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the cases in a catalog
    Cases {
        /// Catalog YAML file (embedded catalog if omitted)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
    /// List the marker panel
    Panel {
        /// Catalog YAML file (embedded catalog if omitted)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
    /// Load and check a catalog file
    Validate {
        /// Catalog YAML file
        file: PathBuf,
    },
    /// Print the embedded catalog as YAML, as a starting point for a new one
    Export,
    /// Play one round non-interactively
    Play {
        /// Catalog YAML file (embedded catalog if omitted)
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Seed for reproducible case selection
        #[arg(long)]
        seed: Option<u64>,
        /// Tickets available for the round
        #[arg(long, default_value_t = DEFAULT_TICKET_BUDGET)]
        tickets: u32,
        /// Fix the hidden case instead of drawing one
        #[arg(long)]
        target: Option<String>,
        /// Marker to order (repeatable, in order)
        #[arg(long = "reveal", value_name = "MARKER")]
        reveals: Vec<String>,
        /// Final diagnosis (case id)
        #[arg(long)]
        guess: String,
        /// Print the final snapshot as JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Cases { catalog }) => list_cases(catalog),
        Some(Commands::Panel { catalog }) => list_panel(catalog),
        Some(Commands::Validate { file }) => validate(file),
        Some(Commands::Export) => export(),
        Some(Commands::Play {
            catalog,
            seed,
            tickets,
            target,
            reveals,
            guess,
            json,
        }) => QuizConfig::new(tickets, seed, catalog)
            .and_then(|config| play(&config, target, reveals, &guess, json)),
        None => {
            println!("Use 'pathsim --help' for commands");
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn load(catalog: Option<PathBuf>) -> QuizResult<CaseCatalog> {
    resolve_catalog(&QuizConfig::new(DEFAULT_TICKET_BUDGET, None, catalog)?)
}

fn list_cases(catalog: Option<PathBuf>) -> QuizResult<()> {
    let catalog = load(catalog)?;
    if catalog.is_empty() {
        println!("No cases found.");
        return Ok(());
    }
    for case in catalog.all_cases() {
        println!(
            "ID: {}, Name: {}, Category: {}, Site: {}",
            case.id, case.name, case.category, case.site
        );
    }
    Ok(())
}

fn list_panel(catalog: Option<PathBuf>) -> QuizResult<()> {
    let catalog = load(catalog)?;
    for marker in catalog.panel().iter() {
        println!("{}", marker);
    }
    Ok(())
}

fn validate(file: PathBuf) -> QuizResult<()> {
    let catalog = CaseCatalog::load(&file)?;
    if catalog.is_empty() {
        println!(
            "{}: valid, but has no cases; a game cannot start from it",
            file.display()
        );
    } else {
        println!(
            "{}: valid, {} cases, {} markers",
            file.display(),
            catalog.len(),
            catalog.panel().len()
        );
    }
    Ok(())
}

fn export() -> QuizResult<()> {
    print!("{}", CaseCatalog::builtin()?.to_yaml_string()?);
    Ok(())
}

fn play(
    config: &QuizConfig,
    target: Option<String>,
    reveals: Vec<String>,
    guess: &str,
    json: bool,
) -> QuizResult<()> {
    let mut session = GameSession::new(resolve_catalog(config)?, config)?;
    if let Some(target) = target {
        session.start_round_with(&target)?;
    }

    for input in reveals {
        // Accept `cd30` for `CD30`; the session itself matches exactly.
        let marker = session
            .catalog()
            .panel()
            .resolve(&input)
            .map(ToString::to_string)
            .unwrap_or(input);
        let tickets_before = session.tickets_remaining();
        match session.reveal_marker(&marker) {
            Some(result) if !json => println!(
                "{:<12} {:<28} tickets {} -> {}",
                marker,
                result,
                tickets_before,
                tickets_before - 1
            ),
            Some(_) => {}
            None if !json => println!("{:<12} (not run)", marker),
            None => {}
        }
    }

    let status = session.submit_diagnosis(guess);
    let snapshot = session.snapshot();

    if json {
        match serde_json::to_string_pretty(&snapshot) {
            Ok(text) => println!("{}", text),
            Err(e) => eprintln!("Error serializing snapshot: {}", e),
        }
        return Ok(());
    }

    match snapshot.outcome {
        Some(outcome) => {
            println!("{}", outcome.headline);
            println!("Target: {} ({})", outcome.target_name, outcome.target_id);
        }
        None if status == Status::Playing => {
            println!("'{}' is not a case in this catalog; no diagnosis recorded", guess);
        }
        None => {}
    }
    Ok(())
}

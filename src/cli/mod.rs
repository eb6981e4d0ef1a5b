// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses arguments with clap and routes each subcommand to a use
// case. Printing, the stdin loop and the HTTP router live here;
// everything they show comes from DetectUseCase or TrainUseCase.
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

/// Interactive stdin loop and report formatting
pub mod console;

/// axum router for the detect endpoint and landing page
pub mod http;

use std::{io, sync::Arc};

use anyhow::Result;
use clap::Parser;
use commands::{Commands, ConsoleArgs, DetectArgs, ServeArgs, TrainArgs};

use crate::application::detect_use_case::DetectUseCase;

#[derive(Parser, Debug)]
#[command(
    name = "idiom-detector",
    version,
    about = "Find idioms in sentences, explain them, and fine-tune a model on the idiom set."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Console(args) => run_console(args),
            Commands::Detect(args)  => run_detect(args),
            Commands::Serve(args)   => run_serve(args),
            Commands::Train(args)   => run_train(args),
        }
    }
}

fn run_console(args: ConsoleArgs) -> Result<()> {
    let use_case = DetectUseCase::from_dir(&args.idioms.idioms_dir);
    let stdin    = io::stdin();
    console::run_console(&use_case, stdin.lock(), io::stdout())
}

fn run_detect(args: DetectArgs) -> Result<()> {
    let use_case = DetectUseCase::from_dir(&args.idioms.idioms_dir);
    let result   = use_case.analyze(&args.sentence);

    if args.json {
        let response: http::DetectResponse = result.into();
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        println!("{}", console::format_report(&args.sentence, &result));
    }
    Ok(())
}

fn run_serve(args: ServeArgs) -> Result<()> {
    // Load before binding so no request ever sees a partial store
    let use_case = DetectUseCase::from_dir(&args.idioms.idioms_dir);
    let state    = http::AppState { detector: Arc::new(use_case) };

    tokio::runtime::Runtime::new()?.block_on(http::serve(args.addr, state))
}

fn run_train(args: TrainArgs) -> Result<()> {
    use crate::application::train_use_case::TrainUseCase;

    tracing::info!("Starting training on idiom files in: {}", args.data_dir.display());

    let model_dir = args.model_dir.clone();
    TrainUseCase::new(args.into()).execute()?;

    println!("Training complete. Model saved at: {}", model_dir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_parses_detect_flags() {
        let cli = Cli::try_parse_from([
            "idiom-detector", "detect",
            "--idioms-dir", "data/idioms",
            "--sentence", "break the ice",
            "--json",
        ])
        .unwrap();

        match cli.command {
            Commands::Detect(a) => {
                assert_eq!(a.idioms.idioms_dir, PathBuf::from("data/idioms"));
                assert_eq!(a.sentence, "break the ice");
                assert!(a.json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_train_defaults_match_config_defaults() {
        let cli = Cli::try_parse_from(["idiom-detector", "train"]).unwrap();
        let Commands::Train(args) = cli.command else {
            panic!("expected train");
        };
        let cfg: crate::application::train_use_case::TrainConfig = args.into();
        assert_eq!(cfg, crate::application::train_use_case::TrainConfig::default());
    }

    #[test]
    fn test_serve_addr_is_validated() {
        assert!(Cli::try_parse_from(["idiom-detector", "serve", "--addr", "not-an-addr"]).is_err());
    }
}

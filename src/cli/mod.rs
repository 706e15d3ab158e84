// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// This is the entry point for all user interaction.
// It uses the `clap` crate to parse command line arguments.
// All business logic is delegated to Layer 2 (application).
//
// Three commands are supported:
//   1. `train`   — trains the model on a phenotype CSV dataset
//   2. `predict` — loads the model package and classifies one sequence
//   3. `serve`   — loads the model package and serves predictions over HTTP

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, TrainArgs, PredictArgs, ServeArgs};

/// The main CLI struct — clap reads the fields and generates
/// argument parsing code automatically via the Parser derive macro.
#[derive(Parser, Debug)]
#[command(
    name = "amr-predict",
    version = "0.1.0",
    about = "Train a per-antibiotic resistance classifier on sequence data, then predict or serve."
)]
pub struct Cli {
    /// The subcommand to run (train, predict or serve)
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    /// This keeps the CLI layer thin — it only routes, never computes.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Train(args)   => Self::run_train(args),
            Commands::Predict(args) => Self::run_predict(args),
            Commands::Serve(args)   => Self::run_serve(args),
        }
    }

    /// Handles the `train` subcommand.
    /// Converts CLI args into a TrainConfig and hands off to Layer 2.
    fn run_train(args: TrainArgs) -> Result<()> {
        use crate::application::train_use_case::TrainUseCase;

        tracing::info!("Starting training on dataset: {}", args.data_path);

        // Convert CLI args → application config (separates presentation from domain)
        let use_case = TrainUseCase::new(args.into());
        use_case.execute()?;

        println!("Training complete. Model package saved.");
        Ok(())
    }

    /// Handles the `predict` subcommand.
    /// Loads the model package and prints one status line per antibiotic.
    fn run_predict(args: PredictArgs) -> Result<()> {
        use crate::application::predict_use_case::PredictUseCase;

        let use_case    = PredictUseCase::new(&args.model_dir)?;
        let predictions = use_case.predict(&args.sequence)?;

        println!("\nPredictions for sequence ({} residues):", args.sequence.trim().len());
        for (antibiotic, phenotype) in &predictions {
            println!("  {:<30} {}", antibiotic, phenotype.label());
        }
        Ok(())
    }

    /// Handles the `serve` subcommand.
    /// Builds the prediction service (degraded if no package is on disk)
    /// and blocks on the HTTP server. The runtime is created here so that
    /// `main` and the other subcommands stay synchronous.
    fn run_serve(args: ServeArgs) -> Result<()> {
        use crate::infra::model_store::ModelStore;
        use crate::service::PredictionService;
        use std::sync::Arc;

        let store   = ModelStore::new(&args.model_dir);
        let service = Arc::new(PredictionService::with_startup_load(&store));

        let addr: std::net::SocketAddr = args.bind.parse()?;

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;
        runtime.block_on(crate::server::run(addr, service))
    }
}

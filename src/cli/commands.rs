// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the three subcommands: `train`, `predict` and `serve`
// and all their configurable flags.

use clap::{Args, Subcommand};
use crate::application::train_use_case::TrainConfig;

/// The top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train the resistance model on a phenotype CSV dataset
    Train(TrainArgs),

    /// Predict per-antibiotic resistance for a single sequence
    Predict(PredictArgs),

    /// Serve predictions over HTTP
    Serve(ServeArgs),
}

/// All arguments for the `train` command.
/// Each field becomes a --flag on the command line.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Path to the phenotype CSV (sequence, antibiotic, phenotype columns)
    #[arg(long, default_value = "data/phenotypes.csv")]
    pub data_path: String,

    /// Directory to save the trained model package
    #[arg(long, default_value = "model")]
    pub model_dir: String,

    /// Length of the overlapping k-mer tokens extracted from each sequence
    #[arg(long, default_value_t = 6)]
    pub kmer_len: usize,

    /// Maximum number of dataset rows used for training
    #[arg(long, default_value_t = 10_000)]
    pub max_rows: usize,

    /// Drop dataset columns whose missing-value fraction exceeds this
    #[arg(long, default_value_t = 0.5)]
    pub missing_threshold: f64,

    /// Fraction of rows held out for evaluation
    #[arg(long, default_value_t = 0.2)]
    pub test_fraction: f64,

    /// Random seed for the train/test shuffle — fixed for reproducibility
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Number of full passes through the training data
    #[arg(long, default_value_t = 25)]
    pub epochs: usize,

    /// Number of samples processed together in one forward pass
    #[arg(long, default_value_t = 32)]
    pub batch_size: usize,

    /// Adam learning rate
    #[arg(long, default_value_t = 1e-2)]
    pub lr: f64,
}

/// Convert CLI TrainArgs into the application-layer TrainConfig.
/// This is the boundary between Layer 1 and Layer 2 —
/// the application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            data_path:         a.data_path,
            model_dir:         a.model_dir,
            kmer_len:          a.kmer_len,
            max_rows:          a.max_rows,
            missing_threshold: a.missing_threshold,
            test_fraction:     a.test_fraction,
            seed:              a.seed,
            epochs:            a.epochs,
            batch_size:        a.batch_size,
            lr:                a.lr,
        }
    }
}

/// All arguments for the `predict` command
#[derive(Args, Debug)]
pub struct PredictArgs {
    /// The raw biological sequence to classify
    #[arg(long)]
    pub sequence: String,

    /// Directory where the model package was saved during training
    #[arg(long, default_value = "model")]
    pub model_dir: String,
}

/// All arguments for the `serve` command
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Directory where the model package was saved during training
    #[arg(long, default_value = "model")]
    pub model_dir: String,

    /// Address to bind the HTTP server on
    #[arg(long, default_value = "0.0.0.0:8000")]
    pub bind: String,
}

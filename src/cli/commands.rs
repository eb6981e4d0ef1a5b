// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Four subcommands:
//
//   console — interactive idiom detection on stdin
//   detect  — analyse one sentence and exit
//   serve   — HTTP endpoint + landing page
//   train   — fine-tune a causal LM on the idiom files
//
// Reference: Rust Book §12 (Building a CLI Program)

use std::{net::SocketAddr, path::PathBuf};

use clap::{Args, Subcommand};

use crate::application::train_use_case::TrainConfig;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Detect idioms in sentences typed on stdin ("exit" to quit)
    Console(ConsoleArgs),

    /// Detect the idiom in a single sentence
    Detect(DetectArgs),

    /// Serve the detector over HTTP
    Serve(ServeArgs),

    /// Fine-tune a small causal language model on idiom records
    Train(TrainArgs),
}

/// Where the detector's idiom dictionary lives
#[derive(Args, Debug, Clone)]
pub struct IdiomArgs {
    /// Directory of idiom .json files (read non-recursively)
    #[arg(long, env = "IDIOM_DATA_DIR", default_value = "gemma")]
    pub idioms_dir: PathBuf,
}

#[derive(Args, Debug)]
pub struct ConsoleArgs {
    #[command(flatten)]
    pub idioms: IdiomArgs,
}

#[derive(Args, Debug)]
pub struct DetectArgs {
    #[command(flatten)]
    pub idioms: IdiomArgs,

    /// The sentence to analyse
    #[arg(long)]
    pub sentence: String,

    /// Print the HTTP-style JSON record instead of the report
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    #[command(flatten)]
    pub idioms: IdiomArgs,

    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:5000")]
    pub addr: SocketAddr,
}

#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Directory of idiom .json files for the training corpus
    #[arg(long, default_value = "Gemma")]
    pub data_dir: PathBuf,

    /// Output directory for tokenizer, checkpoints, metrics and final model
    #[arg(long, default_value = "trained_idiom_model")]
    pub model_dir: PathBuf,

    /// Tokens per sample after truncation/padding
    #[arg(long, default_value_t = 256)]
    pub max_seq_len: usize,

    #[arg(long, default_value_t = 2)]
    pub batch_size: usize,

    #[arg(long, default_value_t = 3)]
    pub epochs: usize,

    #[arg(long, default_value_t = 5e-5)]
    pub lr: f64,

    /// Share of samples used for training; the rest is validation
    #[arg(long, default_value_t = 0.9)]
    pub train_fraction: f64,

    /// Log the running loss every N optimiser steps
    #[arg(long, default_value_t = 50)]
    pub logging_steps: usize,

    /// Epoch checkpoints to keep (0 keeps all)
    #[arg(long, default_value_t = 2)]
    pub save_total_limit: usize,

    #[arg(long, default_value_t = 256)]
    pub d_model: usize,

    /// d_model must be divisible by num_heads
    #[arg(long, default_value_t = 4)]
    pub num_heads: usize,

    #[arg(long, default_value_t = 4)]
    pub num_layers: usize,

    #[arg(long, default_value_t = 1024)]
    pub d_ff: usize,

    #[arg(long, default_value_t = 0.1)]
    pub dropout: f64,

    /// Vocabulary cap when a tokenizer has to be built from the corpus
    #[arg(long, default_value_t = 8000)]
    pub vocab_size: usize,
}

/// The application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            data_dir:         a.data_dir,
            model_dir:        a.model_dir,
            max_seq_len:      a.max_seq_len,
            batch_size:       a.batch_size,
            epochs:           a.epochs,
            lr:               a.lr,
            train_fraction:   a.train_fraction,
            logging_steps:    a.logging_steps,
            save_total_limit: a.save_total_limit,
            d_model:          a.d_model,
            num_heads:        a.num_heads,
            num_layers:       a.num_layers,
            d_ff:             a.d_ff,
            dropout:          a.dropout,
            vocab_size:       a.vocab_size,
        }
    }
}

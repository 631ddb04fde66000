//! Casaval CLI Library
//!
//! This crate provides the command-line interface for casaval, including:
//!
//! - **Train**: Run the housing-price training pipeline and persist artifacts
//! - **Serve**: Serve predictions, chart data, and the chat side-channel over HTTP
//!
//! # Example
//!
//! ```bash
//! # Train the model
//! casaval train --data-path housing.csv --output-dir ./artifacts
//!
//! # Serve it
//! casaval serve --artifact-dir ./artifacts --data-path housing.csv --port 8080
//! ```

pub mod commands;

use clap::{Parser, Subcommand};

pub use commands::{ServeCommand, TrainCommand};

/// Casaval - California housing price prediction
///
/// Provides tools for training the linear-regression housing model and
/// serving it behind an HTTP form with chart panels and a chat assistant.
#[derive(Parser, Debug)]
#[command(name = "casaval")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train the housing model and write the scaler and model artifacts
    Train(TrainCommand),

    /// Serve the trained model over HTTP
    Serve(ServeCommand),
}

/// Result type alias for CLI operations
pub type CliResult<T> = anyhow::Result<T>;

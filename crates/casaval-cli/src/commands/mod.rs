//! CLI Command Implementations
//!
//! This module contains the implementations for the CLI subcommands:
//!
//! - [`train`]: One-shot training pipeline
//! - [`serve`]: HTTP serving

mod serve;
mod train;

pub use serve::ServeCommand;
pub use train::TrainCommand;

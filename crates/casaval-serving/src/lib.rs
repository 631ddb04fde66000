//! HTTP serving for the casaval housing model.
//!
//! The serving phase loads the two artifacts written by training and exposes:
//!
//! - a single-page form that collects the eight numeric fields and the
//!   ocean-proximity selection
//! - `POST /api/predict`, which reproduces the training-time feature encoding
//!   exactly (shared encoder, frozen scaler, frozen coefficients)
//! - read-only chart-data endpoints over the raw dataset
//! - a chat side-channel to an external LLM service, isolated so that its
//!   failures never touch the prediction path
//!
//! The artifacts are read-only after load and shared across handlers behind
//! `Arc`; concurrent predictions need no locking. Only the chat session store
//! is mutable.
//!
//! # Quick start
//!
//! ```no_run
//! use casaval_serving::{serve, ServerConfig};
//!
//! # async fn example() -> casaval_serving::ServingResult<()> {
//! let config = ServerConfig::builder()
//!     .host("0.0.0.0")
//!     .port(8080)
//!     .artifact_dir("./artifacts")
//!     .data_path("./housing.csv")
//!     .build();
//! serve(config).await?;
//! # Ok(())
//! # }
//! ```

pub mod chat;
pub mod config;
pub mod error;
pub mod http;
pub mod page;
pub mod predictor;
pub mod session;

pub use chat::{ChatBackend, HttpChatClient};
pub use config::{ChatConfig, ServerConfig, ServerConfigBuilder};
pub use error::{ServingError, ServingResult};
pub use http::{create_router, serve, AppState};
pub use predictor::{Prediction, Predictor};
pub use session::{ChatMessage, ChatRole, ChatSession, SessionStore};

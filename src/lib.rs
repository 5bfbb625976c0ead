//! # worksheet
//!
//! A terminal client for a worksheet backend: learners answer tasks one card
//! at a time, and the admin view creates, edits and deletes tasks.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use worksheet::{app::Route, config::Config, AppError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let config = Config::from_env()?;
//!     worksheet::run(&config, Route::Tasks).await
//! }
//! ```

pub mod admin;
pub mod api;
pub mod app;
pub mod config;
pub mod models;
pub mod quiz;
pub mod runtime;
pub mod terminal;
mod ui;
pub mod view;

use std::io;

use thiserror::Error;
use tracing::info;

use crate::api::ApiClient;
use crate::app::Route;
use crate::config::{Config, ConfigError};

/// Error type for running the client.
#[derive(Debug, Error)]
pub enum AppError {
    /// Terminal IO failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

/// Connect to the configured backend and run the terminal UI until the user
/// quits.
pub async fn run(config: &Config, route: Route) -> Result<(), AppError> {
    let client = ApiClient::from_config(config)?;
    info!(api_url = %config.api_url, ?route, "Starting worksheet client");
    runtime::run(client, route, config.api_url.clone()).await
}

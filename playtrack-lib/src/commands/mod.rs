//! Command-line interface and orchestration for playtrack
//!
//! # Commands
//!
//! - **serve**: Start one polling task per tracked game and serve the query API
//!   (plus, optionally, the dashboard's static files) until interrupted
//! - **poll**: Record a single sample for every tracked game and exit
//! - **show**: Print one game's history, or its growth figures, as JSON
//! - **init**: Generate a default configuration file
//! - **validate**: Check a configuration file
//!
//! Configuration is read from `playtrack.toml` (or the file named by `--config`)
//! and covers the tracked games, the poll interval, and where data lives.

mod common;
mod config;
mod host;
mod init;
mod poll;
mod run;
mod serve;
mod show;
mod validate;

pub use common::{CommonArgs, LogLevel, init_logging};
pub use config::{Config, DEFAULT_CONFIG_FILE, DEFAULT_CONFIG_TOML};
pub use host::Host;
pub use init::{InitArgs, init_config};
pub use poll::{PollArgs, poll_once};
pub use run::run;
pub use serve::{ServeArgs, run_server, serve_dashboard};
pub use show::{ShowArgs, show_history};
pub use validate::{ValidateArgs, validate_config};

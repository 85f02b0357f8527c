//! Command dispatch logic for playtrack

use super::{InitArgs, PollArgs, ServeArgs, ShowArgs, ValidateArgs, init_config, poll_once, serve_dashboard, show_history, validate_config};
use crate::{Host, Result};
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "playtrack", version, author, long_about = None)]
#[command(about = "Track visit and player counts of games over time")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: PlaytrackSubcommand,
}

#[derive(Subcommand, Debug)]
enum PlaytrackSubcommand {
    /// Poll the tracked games and serve their statistics over HTTP
    Serve(Box<ServeArgs>),
    /// Record one sample for every tracked game and exit
    Poll(PollArgs),
    /// Print the recorded history of a tracked game
    Show(ShowArgs),
    /// Generate a default configuration file
    Init(InitArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

/// Dispatch command-line arguments to the appropriate handler
///
/// This function parses the command-line arguments and executes the corresponding
/// subcommand. It's designed to be called from main.rs with the program arguments.
///
/// # Errors
///
/// Returns an error if command parsing fails or if the executed command fails
pub async fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    let cli = Cli::parse_from(args);

    match &cli.command {
        PlaytrackSubcommand::Serve(serve_args) => serve_dashboard(host, serve_args).await,
        PlaytrackSubcommand::Poll(poll_args) => poll_once(host, poll_args).await,
        PlaytrackSubcommand::Show(show_args) => show_history(host, show_args).await,
        PlaytrackSubcommand::Init(init_args) => init_config(host, init_args),
        PlaytrackSubcommand::Validate(validate_args) => validate_config(host, validate_args),
    }
}

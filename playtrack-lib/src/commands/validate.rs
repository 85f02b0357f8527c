use super::Host;
use super::config::Config;
use crate::Result;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file (default is `playtrack.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,
}

pub fn validate_config<H: Host>(host: &mut H, args: &ValidateArgs) -> Result<()> {
    validate_in(host, Utf8Path::new("."), args.config.as_ref())
}

fn validate_in<H: Host>(host: &mut H, base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<()> {
    match Config::load(base_dir, config_path) {
        Ok(config) => {
            let _ = writeln!(host.output(), "Configuration file is valid");
            if let Some(path) = config_path {
                let _ = writeln!(host.output(), "Config file: {path}");
            }

            if config.tracked_games.is_empty() {
                let _ = writeln!(host.output(), "Warning: no games are tracked; serve and poll will refuse to start");
            } else {
                let games: Vec<_> = config.tracked_games.iter().map(ToString::to_string).collect();
                let _ = writeln!(host.output(), "Tracked games: {}", games.join(", "));
                let _ = writeln!(host.output(), "Poll interval: {} minute(s)", config.poll_interval_minutes);
            }
            Ok(())
        }
        Err(e) => {
            let _ = writeln!(host.error(), "❌ Configuration validation failed: {e}");
            host.exit(1);
            Err(e)
        }
    }
}

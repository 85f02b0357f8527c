use super::Host;
use super::config::{Config, DEFAULT_CONFIG_FILE};
use crate::Result;
use camino::Utf8PathBuf;
use clap::Parser;
use ohno::bail;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Output configuration file path (default is `playtrack.toml`)
    #[arg(value_name = "PATH")]
    pub output: Option<Utf8PathBuf>,

    /// Overwrite the file if it already exists
    #[arg(long)]
    pub force: bool,
}

pub fn init_config<H: Host>(host: &mut H, args: &InitArgs) -> Result<()> {
    let output = args.output.clone().unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_CONFIG_FILE));

    if output.exists() && !args.force {
        bail!("'{output}' already exists; use --force to overwrite it");
    }

    Config::save_default(&output)?;
    let _ = writeln!(host.output(), "Generated default configuration file: {output}");
    Ok(())
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::commands::host::TestHost;

    fn utf8(path: std::path::PathBuf) -> Utf8PathBuf {
        Utf8PathBuf::try_from(path).unwrap()
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_init_writes_default_config() {
        let tmp = tempfile::tempdir().unwrap();
        let output = utf8(tmp.path().join("playtrack.toml"));
        let mut host = TestHost::new();

        init_config(&mut host, &InitArgs { output: Some(output.clone()), force: false }).unwrap();

        assert_eq!(std::fs::read_to_string(&output).unwrap(), crate::commands::config::DEFAULT_CONFIG_TOML);
        assert!(host.output_str().contains("Generated default configuration file"));
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_init_refuses_to_overwrite() {
        let tmp = tempfile::tempdir().unwrap();
        let output = utf8(tmp.path().join("playtrack.toml"));
        std::fs::write(&output, "tracked_games = [1]").unwrap();
        let mut host = TestHost::new();

        let err = init_config(&mut host, &InitArgs { output: Some(output.clone()), force: false }).unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "tracked_games = [1]");

        init_config(&mut host, &InitArgs { output: Some(output.clone()), force: true }).unwrap();
        assert_ne!(std::fs::read_to_string(&output).unwrap(), "tracked_games = [1]");
    }
}

use super::Host;
use super::common::{CommonArgs, open};
use crate::Result;
use crate::poller::{SystemClock, run_cycle};
use clap::Parser;
use futures_util::future::join_all;
use ohno::bail;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct PollArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Record one sample for every tracked game, then exit
pub async fn poll_once<H: Host>(host: &mut H, args: &PollArgs) -> Result<()> {
    let config = args.common.load_config()?;
    let keys = config.require_games()?;
    let (store, client) = open(&config)?;

    let outcomes = join_all(keys.iter().map(|&key| run_cycle(&client, &store, &SystemClock, key))).await;
    let recorded = outcomes.iter().filter(|&&ok| ok).count();

    let _ = writeln!(host.output(), "Recorded {recorded} of {} sample(s)", keys.len());

    if recorded < keys.len() {
        bail!("{} of {} game(s) could not be polled", keys.len() - recorded, keys.len());
    }

    Ok(())
}

use super::Host;
use super::common::CommonArgs;
use crate::Result;
use crate::query::{Query, QueryResult};
use crate::store::SampleStore;
use clap::Parser;
use ohno::{IntoAppError, bail};
use std::io::Write;

#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Identifier of the game to show
    #[arg(value_name = "GAME")]
    pub game: String,

    /// Show only the growth figures of each sample
    #[arg(long)]
    pub growth: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Print the recorded history of one tracked game as JSON
pub async fn show_history<H: Host>(host: &mut H, args: &ShowArgs) -> Result<()> {
    let config = args.common.load_config()?;
    let query = Query::new(SampleStore::new(config.data_dir()?), &config.tracked_games);

    let json = if args.growth {
        render(query.growth(&args.game).await)?
    } else {
        render(query.history(&args.game).await)?
    };

    let _ = writeln!(host.output(), "{json}");
    Ok(())
}

fn render<T: serde::Serialize>(result: QueryResult<T>) -> Result<String> {
    match result {
        QueryResult::Found(data) => serde_json::to_string_pretty(&data).into_app_err("serializing history"),
        QueryResult::NotTracked(id) => bail!("game {id} is not tracked"),
    }
}

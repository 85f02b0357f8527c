use super::Host;
use super::common::{CommonArgs, open};
use super::config::Config;
use crate::Result;
use crate::poller::{Clock, StatsSource, Supervisor, SystemClock};
use crate::query::{Query, router, serve, shutdown_signal};
use crate::store::SampleStore;
use camino::Utf8PathBuf;
use clap::Parser;
use core::net::{Ipv4Addr, SocketAddr};
use ohno::IntoAppError;
use std::io::Write;
use std::sync::Arc;
use tokio::net::TcpListener;

#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Port to listen on (overrides the configuration file)
    #[arg(long, short = 'p', value_name = "PORT", env = "PORT")]
    pub port: Option<u16>,

    /// Directory with the dashboard's static files (overrides the configuration file)
    #[arg(long, value_name = "PATH")]
    pub public_dir: Option<Utf8PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Poll every tracked game and serve the query API until a shutdown signal arrives
pub async fn serve_dashboard<H: Host>(host: &mut H, args: &ServeArgs) -> Result<()> {
    let mut config = args.common.load_config()?;
    let _ = config.require_games()?;

    if let Some(port) = args.port {
        config.port = port;
    }

    if let Some(dir) = &args.public_dir {
        config.public_dir = Some(dir.clone());
    }

    let (store, client) = open(&config)?;

    let address = SocketAddr::from((Ipv4Addr::UNSPECIFIED, config.port));
    let listener = TcpListener::bind(address)
        .await
        .into_app_err_with(|| format!("binding to {address}"))?;

    let _ = writeln!(
        host.output(),
        "Tracking {} game(s), serving on http://{address}",
        config.tracked_games.len()
    );

    run_server(&config, store, listener, Arc::new(client), Arc::new(SystemClock), shutdown_signal()).await
}

/// Run the pollers and the HTTP server on `listener` until `shutdown` completes
///
/// The pollers are stopped once the server has drained.
pub async fn run_server<S, C>(
    config: &Config,
    store: SampleStore,
    listener: TcpListener,
    source: Arc<S>,
    clock: Arc<C>,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<()>
where
    S: StatsSource + 'static,
    C: Clock + 'static,
{
    let supervisor = Supervisor::start(&config.tracked_games, config.poll_interval(), source, store.clone(), clock);

    let query = Query::new(store, &config.tracked_games);
    let app = router(query, config.public_dir.as_deref().map(camino::Utf8Path::as_std_path));

    let result = serve(listener, app, shutdown).await;
    supervisor.shutdown().await;
    result
}

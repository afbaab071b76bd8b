use std::io::BufReader;

use itertools::Itertools;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use apex_monitor::{spawn_input_listener, Config, Monitor, RenderArea};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env();
    let Some(mut monitor) = Monitor::discover(&config.base_path, &mut std::io::stdout()).await?
    else {
        return Ok(());
    };
    tracing::info!(
        indices = %monitor.devices().iter().map(|d| d.index()).join(", "),
        "found apex devices"
    );

    let cancel = CancellationToken::new();
    spawn_input_listener(BufReader::new(std::io::stdin()), cancel.clone());

    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            interrupt.cancel();
        }
    });

    let mut area = RenderArea::start(std::io::stdout())?;
    monitor.run(&mut area, config.interval, cancel).await?;

    Ok(())
}

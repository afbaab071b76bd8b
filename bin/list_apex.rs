use cli_table::print_stdout;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use apex_monitor::{device_table, Config, Monitor};

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
    monitor.refresh().await;

    for device in monitor.devices() {
        println!("{device}: {}", device.path().display());
    }

    print_stdout(device_table(monitor.devices()))?;

    Ok(())
}

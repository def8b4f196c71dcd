use std::{env, error::Error};

use tokio::sync::broadcast;
use typhoon::{
    config::{ConfigLoadError, ServerConfig},
    telemetry::oltp::init_meter,
    utils::leak,
    Typhoon,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let _ = dotenvy::dotenv();
    #[cfg(debug_assertions)]
    env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .parse_default_env()
        .init();
    #[cfg(not(debug_assertions))]
    env_logger::init();

    let meter_provider = if dotenvy::var("OTEL_EXPORTER_OTLP_ENDPOINT").is_ok() {
        Some(init_meter()?)
    } else {
        None
    };

    let config_file = env::current_dir()?.join("settings.toml");

    let config = match ServerConfig::load(&config_file) {
        Ok(config) => {
            // Save config to fill missing fields
            let _ = config.save(&config_file);
            config
        }
        Err(ConfigLoadError::Io(_)) => {
            let default_config = ServerConfig::default();
            let _ = default_config.save(&config_file);
            default_config
        }
        Err(err) => return Err(err.into()),
    };

    let stop = leak(broadcast::channel(1).0);
    let typhoon = leak(Typhoon::new(config, stop.clone())?);
    let server = tokio::spawn(async move {
        if let Err(e) = typhoon.start().await {
            log::error!("{e}");
        }
    });

    {
        use futures::future::{select_all, FutureExt};
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigint = signal(SignalKind::interrupt())?;
        let mut sigterm = signal(SignalKind::terminate())?;

        let sigint_fut = sigint.recv().boxed();
        let sigterm_fut = sigterm.recv().boxed();

        tokio::select! {
            _ = select_all([sigint_fut, sigterm_fut]) => {
                log::info!("Received signal, stopping...");
                let _ = stop.send(());
            }
            _ = server => {}
        }
    }

    if let Some(provider) = meter_provider {
        provider.shutdown()?;
    }
    Ok(())
}

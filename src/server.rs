use std::{net::IpAddr, sync::Arc, time::Duration};

use tokio::{
    net::TcpListener,
    sync::{broadcast, Semaphore},
};

use crate::{
    config::{ConfigLoadError, ServerConfig},
    connection::Connection,
    context::ServerContext,
    logging::TyphoonLogger,
    ratelimit::{KeyedRateLimiter, RateLimitResult},
};

pub struct Typhoon {
    context: Arc<ServerContext>,
    stop: broadcast::Sender<()>,
}

impl Typhoon {
    pub fn new(config: ServerConfig, stop: broadcast::Sender<()>) -> Result<Self, ConfigLoadError> {
        Ok(Self {
            context: Arc::new(ServerContext::new(config)?),
            stop,
        })
    }

    pub async fn start(&self) -> anyhow::Result<()> {
        let config = &self.context.config;
        TyphoonLogger::preparing_socket(&config.bind);
        let listener = TcpListener::bind(config.bind_addr()?).await?;
        self.serve(listener).await
    }

    /// Accepts connections on `listener` until the stop signal fires.
    pub async fn serve(&self, listener: TcpListener) -> anyhow::Result<()> {
        let config = &self.context.config;
        let semaphore = Arc::new(Semaphore::new(config.max_conn as usize));
        let rate_limiter: KeyedRateLimiter<IpAddr> =
            KeyedRateLimiter::new(config.rate_limit, Duration::from_secs(config.cooldown));
        let mut stop = self.stop.subscribe();

        loop {
            let (stream, addr) = tokio::select! {
                accepted = listener.accept() => match accepted {
                    Ok(accepted) => accepted,
                    Err(err) => {
                        TyphoonLogger::accept_failed(&err);
                        continue;
                    }
                },
                _ = stop.recv() => {
                    TyphoonLogger::stopping();
                    return Ok(());
                }
            };

            if let RateLimitResult::Disallowed { .. } = rate_limiter.check(&addr.ip()) {
                TyphoonLogger::rate_limited(&addr);
                continue;
            }

            let Ok(permit) = Arc::clone(&semaphore).try_acquire_owned() else {
                TyphoonLogger::connection_limit(&addr);
                continue;
            };

            if dotenvy::var("NO_NODELAY").is_err() {
                if let Err(e) = stream.set_nodelay(true) {
                    TyphoonLogger::tcp_nodelay_failed(&e);
                }
            }

            let context = Arc::clone(&self.context);
            tokio::spawn(async move {
                context.metrics.record_open();
                TyphoonLogger::new_connection(&addr);
                let connection = Connection::new(stream, addr, Arc::clone(&context));
                if let Err(e) = connection.serve().await {
                    TyphoonLogger::connection_closed(&addr, &e);
                }
                drop(permit);
            });
        }
    }
}

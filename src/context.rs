use crate::{
    compat::CompatibilityPolicy,
    config::{ConfigLoadError, ServerConfig},
    dispatcher::Dispatcher,
    metrics::SessionMetrics,
    registry::PlayerRegistry,
    telemetry::get_meter,
};

/// State shared by every connection task. Only `registry` mutates after startup.
pub struct ServerContext {
    pub config: ServerConfig,
    pub compat: CompatibilityPolicy,
    pub registry: PlayerRegistry,
    pub dispatcher: Dispatcher,
    pub metrics: SessionMetrics,
}

impl ServerContext {
    pub fn new(config: ServerConfig) -> Result<Self, ConfigLoadError> {
        config.validate()?;
        Ok(Self {
            compat: CompatibilityPolicy::from_config(&config)?,
            config,
            registry: PlayerRegistry::new(),
            dispatcher: Dispatcher::new(),
            metrics: SessionMetrics::new(&get_meter()),
        })
    }
}

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use infrastructure::{HttpServerConfig, MonitoringConfig};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app_user: String,
    pub slack_webhook: String,
    pub alexa_application_id: String,
    #[serde(default)]
    pub http_server: HttpServerConfig,
    #[serde(default)]
    pub monitoring: MonitoringConfig,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::with_name("config.toml").required(false))
            .add_source(Environment::default().separator("__"));

        Self::load(builder)
    }

    fn load(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        builder.build()?.try_deserialize()
    }
}

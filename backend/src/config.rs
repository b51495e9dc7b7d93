use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    pub db_max_connections: u32,
    pub cors_allowed_origin: Option<String>,
    pub revalidate_webhook_url: Option<String>,
    pub revalidate_webhook_secret: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .set_default("host", "127.0.0.1")?
            .set_default("port", 8080)?
            .set_default("db_max_connections", 20)?
            .add_source(config::Environment::default())
            .build()?;

        config.try_deserialize()
    }
}

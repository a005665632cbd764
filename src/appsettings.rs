use config::{Config, ConfigBuilder, ConfigError, Environment, File, builder::DefaultState};
use medremind_models::settings::Settings;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8081";

pub type AppSettings = Settings;

fn with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("api.base_url", DEFAULT_BASE_URL)?
        .set_default("session.path", ".medremind-session.json")?
        .set_default("display.timezone", "UTC")?
        .set_default("watch.interval_secs", 30)
}

fn environment() -> Environment {
    Environment::with_prefix("APP")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

/// Defaults, then `appsettings.*`, then `appsettings.local.*`, then `APP_*`
/// variables (`APP_API__BASE_URL` sets `api.base_url`).
pub fn load() -> Result<AppSettings, ConfigError> {
    with_defaults()?
        .add_source(File::with_name("appsettings").required(false))
        .add_source(File::with_name("appsettings.local").required(false))
        .add_source(environment())
        .build()?
        .try_deserialize()
}

use std::{path::PathBuf, time::Duration};

use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl ApiSettings {
    /// `None` leaves the HTTP client's own default in place.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct SessionSettings {
    pub path: PathBuf,
}

#[derive(Deserialize, Debug, Clone)]
pub struct DisplaySettings {
    pub timezone: chrono_tz::Tz,
}

#[derive(Deserialize, Debug, Clone)]
pub struct WatchSettings {
    pub interval_secs: u64,
}

impl WatchSettings {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs.max(1))
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    pub api: ApiSettings,
    pub session: SessionSettings,
    pub display: DisplaySettings,
    pub watch: WatchSettings,
}

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use serde::{Deserialize, Serialize};
use tr_app::{AppConfig, ConfigSource, LogFormat};

use crate::game::{GameSettings, COUNTDOWN_CEILING_SECS};

/// Read in this order: defaults, `Range.toml`, `RANGE_*` environment.
pub const CONFIG_SOURCE: ConfigSource<'static> = ConfigSource {
    file: "Range.toml",
    env_prefix: "RANGE_",
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,

    /// Countdown used by config changes, reset, and countdown resumes that
    /// do not name their own length.
    pub countdown_secs: u64,
    pub max_countdown_secs: u64,

    /// Number of accepted events kept for `GET /events`.
    pub event_history: usize,

    /// Messages buffered per viewer before a slow one starts skipping.
    pub bus_capacity: usize,

    /// Comma separated; empty allows any origin.
    pub cors_allowed_origins: String,

    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 3001,
            countdown_secs: 3,
            max_countdown_secs: 60,
            event_history: 100,
            bus_capacity: 64,
            cors_allowed_origins: String::new(),
            log_format: LogFormat::Pretty,
        }
    }
}

impl Config {
    pub const fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn game_settings(&self) -> GameSettings {
        let countdown_secs = self.countdown_secs.clamp(1, COUNTDOWN_CEILING_SECS);

        GameSettings {
            countdown_secs,
            max_countdown_secs: self
                .max_countdown_secs
                .clamp(countdown_secs, COUNTDOWN_CEILING_SECS),
            event_history: self.event_history.max(1),
            bus_capacity: self.bus_capacity.max(1),
        }
    }
}

impl AppConfig for Config {
    fn log_format(&self) -> LogFormat {
        self.log_format
    }
}

//! Process configuration for the handler binaries.
//!
//! Configuration is read once at cold start from environment variables:
//!
//! | Variable                | Meaning                                          | Default          |
//! |-------------------------|--------------------------------------------------|------------------|
//! | `DATAZONE_ENDPOINT_URL` | Endpoint override for the DataZone client        | SDK resolution   |
//! | `AWS_REGION`            | Region for the DataZone client                   | provider chain   |
//! | `CATALOG_LOG_EVENTS`    | Log every received event at info level           | `true`           |
//! | `RUST_LOG`              | `env_logger` filter                              | `info`           |

use aws_sdk_datazone::config::Region;

pub const ENDPOINT_URL_VAR: &str = "DATAZONE_ENDPOINT_URL";
pub const REGION_VAR: &str = "AWS_REGION";
pub const LOG_EVENTS_VAR: &str = "CATALOG_LOG_EVENTS";

/// Settings shared by every handler binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerConfig {
    pub endpoint_url: Option<String>,
    pub region: Option<String>,
    pub log_events: bool,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            endpoint_url: None,
            region: None,
            log_events: true,
        }
    }
}

impl HandlerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let log_events = match non_empty(LOG_EVENTS_VAR) {
            Some(value) => !matches!(
                value.trim().to_ascii_lowercase().as_str(),
                "false" | "0" | "no" | "off"
            ),
            None => true,
        };

        Self {
            endpoint_url: non_empty(ENDPOINT_URL_VAR),
            region: non_empty(REGION_VAR),
            log_events,
        }
    }

    /// Load shared AWS configuration, applying the region override.
    pub async fn sdk_config(&self) -> aws_config::SdkConfig {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(region) = &self.region {
            loader = loader.region(Region::new(region.clone()));
        }
        loader.load().await
    }
}

/// Install `env_logger`, defaulting to `info` unless `RUST_LOG` says otherwise.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .try_init();
}

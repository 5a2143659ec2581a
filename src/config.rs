//! Configuration parsed from environment variables.
//!
//! `from_env` reads the process environment; `from_lookup` takes any key
//! lookup so parsing stays testable without touching global state.

use std::time::Duration;

use crate::sink::confirmation::{DEFAULT_FROM_NAME, Sender};
use crate::sink::simulated::DEFAULT_SIMULATED_DELAY_MS;
use crate::sink::webhook::{DEFAULT_WEBHOOK_CONNECT_TIMEOUT_SECS, DEFAULT_WEBHOOK_TIMEOUT_SECS, WebhookTimeouts};

pub const DEFAULT_CLOSE_DELAY_MS: u64 = 3000;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown REGISTRATION_SINK: {0}")]
    UnknownSink(String),
    #[error("missing required env var {var}")]
    Missing { var: &'static str },
    #[error("invalid value for {var}: {value}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkConfig {
    Simulated { delay: Duration, failure: Option<String>, sender: Sender },
    Webhook { url: String, timeouts: WebhookTimeouts },
    Email { api_key: String, from: String, sender: Sender },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub sink: SinkConfig,
    /// How long a successful registration stays on screen before the modal closes.
    pub close_delay: Duration,
}

impl AppConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `REGISTRATION_SINK`: `simulated` (default), `webhook`, or `email`
    /// - `REGISTRATION_CLOSE_DELAY_MS`: default 3000
    /// - `SIMULATED_SINK_DELAY_MS`: default 1500
    /// - `SIMULATED_SINK_FAILURE`: when set, the simulated sink always fails with this message
    /// - `REGISTRATION_WEBHOOK_TIMEOUT_SECS`: default 10
    /// - `REGISTRATION_WEBHOOK_CONNECT_TIMEOUT_SECS`: default 5
    /// - `REGISTRATION_FROM_NAME`, `REGISTRATION_REPLY_TO`
    ///
    /// Required by sink:
    /// - webhook: `REGISTRATION_WEBHOOK_URL`
    /// - email: `RESEND_API_KEY`, `RESEND_FROM`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        let close_delay = Duration::from_millis(parse_or(&get, "REGISTRATION_CLOSE_DELAY_MS", DEFAULT_CLOSE_DELAY_MS)?);
        let sender = Sender {
            from_name: get("REGISTRATION_FROM_NAME").unwrap_or_else(|| DEFAULT_FROM_NAME.to_owned()),
            reply_to: get("REGISTRATION_REPLY_TO"),
        };

        let sink = match get("REGISTRATION_SINK").as_deref().unwrap_or("simulated") {
            "simulated" => SinkConfig::Simulated {
                delay: Duration::from_millis(parse_or(&get, "SIMULATED_SINK_DELAY_MS", DEFAULT_SIMULATED_DELAY_MS)?),
                failure: get("SIMULATED_SINK_FAILURE"),
                sender,
            },
            "webhook" => {
                let url = get("REGISTRATION_WEBHOOK_URL").ok_or(ConfigError::Missing { var: "REGISTRATION_WEBHOOK_URL" })?;
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    return Err(ConfigError::Invalid { var: "REGISTRATION_WEBHOOK_URL", value: url });
                }
                let timeouts = WebhookTimeouts {
                    request_secs: parse_or(&get, "REGISTRATION_WEBHOOK_TIMEOUT_SECS", DEFAULT_WEBHOOK_TIMEOUT_SECS)?,
                    connect_secs: parse_or(
                        &get,
                        "REGISTRATION_WEBHOOK_CONNECT_TIMEOUT_SECS",
                        DEFAULT_WEBHOOK_CONNECT_TIMEOUT_SECS,
                    )?,
                };
                SinkConfig::Webhook { url, timeouts }
            }
            "email" => SinkConfig::Email {
                api_key: get("RESEND_API_KEY").ok_or(ConfigError::Missing { var: "RESEND_API_KEY" })?,
                from: get("RESEND_FROM").ok_or(ConfigError::Missing { var: "RESEND_FROM" })?,
                sender,
            },
            other => return Err(ConfigError::UnknownSink(other.to_owned())),
        };

        Ok(Self { sink, close_delay })
    }
}

fn parse_or<G>(get: &G, var: &'static str, default: u64) -> Result<u64, ConfigError>
where
    G: Fn(&str) -> Option<String>,
{
    match get(var) {
        None => Ok(default),
        Some(raw) => raw.parse::<u64>().map_err(|_| ConfigError::Invalid { var, value: raw }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::{env, fmt, time::Duration};

use tracing::warn;

pub const DEFAULT_BASE_URL: &str = "https://api.geoapify.com/v1/routing";
pub const API_KEY_VAR: &str = "GEOAPIFY_API_KEY";
pub const BASE_URL_VAR: &str = "ROUTING_BASE_URL";
pub const TIMEOUT_VAR: &str = "ROUTING_TIMEOUT_SECS";

/// Where the routing API credential comes from.
#[derive(Clone, PartialEq, Eq)]
pub enum KeySource {
    /// Read from this environment variable on every request.
    Environment(String),
    Fixed(Option<String>),
}

impl KeySource {
    /// The current key, or `None` when it is unset or blank.
    pub fn resolve(&self) -> Option<String> {
        let key = match self {
            KeySource::Environment(name) => env::var(name).ok(),
            KeySource::Fixed(key) => key.clone(),
        };
        key.map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
    }

    pub fn describe(&self) -> String {
        match self {
            KeySource::Environment(name) => format!("environment variable {name}"),
            KeySource::Fixed(_) => "configured key".to_string(),
        }
    }
}

/// Never prints a fixed key.
impl fmt::Debug for KeySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeySource::Environment(name) => f.debug_tuple("Environment").field(name).finish(),
            KeySource::Fixed(Some(_)) => f.write_str("Fixed(<redacted>)"),
            KeySource::Fixed(None) => f.write_str("Fixed(None)"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub key_source: KeySource,
    pub details: String,
    /// Per-attempt request timeout.
    pub timeout: Duration,
    pub max_attempts: u32,
    /// Delay before the second attempt; doubles after each further timeout.
    pub initial_backoff: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            key_source: KeySource::Environment(API_KEY_VAR.into()),
            details: "instruction_details,route_details".into(),
            timeout: Duration::from_secs(10),
            max_attempts: 3,
            initial_backoff: Duration::from_secs(2),
        }
    }
}

impl Config {
    /// Defaults, with the endpoint and timeout optionally overridden by
    /// `ROUTING_BASE_URL` and `ROUTING_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(base_url) = env::var(BASE_URL_VAR) {
            if base_url.trim().is_empty() {
                warn!("{BASE_URL_VAR} is blank, using {}", config.base_url);
            } else {
                config = config.with_base_url(base_url.trim());
            }
        }
        if let Ok(timeout) = env::var(TIMEOUT_VAR) {
            match timeout.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout = Duration::from_secs(secs),
                _ => warn!(
                    "Ignoring {TIMEOUT_VAR}={timeout:?}, using {:?}",
                    config.timeout
                ),
            }
        }
        config
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.key_source = KeySource::Fixed(Some(key.into()));
        self
    }

    pub fn without_api_key(mut self) -> Self {
        self.key_source = KeySource::Fixed(None);
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_backoff(mut self, max_attempts: u32, initial_backoff: Duration) -> Self {
        self.max_attempts = max_attempts;
        self.initial_backoff = initial_backoff;
        self
    }

    pub fn api_key(&self) -> Option<String> {
        self.key_source.resolve()
    }
}

#[test]
fn blank_key_is_missing() {
    assert_eq!(KeySource::Fixed(Some("  ".into())).resolve(), None);
    assert_eq!(
        KeySource::Fixed(Some("abc".into())).resolve().as_deref(),
        Some("abc")
    );
}

#[test]
fn debug_hides_fixed_key() {
    let config = Config::default().with_api_key("secret-123");
    let printed = format!("{config:?}");
    assert!(!printed.contains("secret-123"));
    assert!(printed.contains("Fixed(<redacted>)"));
    assert!(format!("{:?}", Config::default().key_source).contains("GEOAPIFY_API_KEY"));
}

#[test]
fn base_url_override() {
    let config = Config::default().with_base_url("http://localhost:8080/v1/routing");
    assert_eq!(config.base_url, "http://localhost:8080/v1/routing");
    assert_eq!(config.timeout, Config::default().timeout);
}

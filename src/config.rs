use dotenvy::dotenv;
use once_cell::sync::Lazy;
use std::env;
use std::time::Duration;

pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    dotenv().ok(); // Load .env file if present
    Config {
        request_timeout: timeout_from_secs(get_env_parsed("SEARCHQ_TIMEOUT_SECS", 30)),
        log_level: get_env_parsed("SEARCHQ_LOG_LEVEL", tracing::Level::WARN),
    }
});

#[derive(Debug, Clone)]
pub struct Config {
    /// `None` means the request may block indefinitely.
    pub request_timeout: Option<Duration>,
    pub log_level: tracing::Level,
}

fn timeout_from_secs(secs: u64) -> Option<Duration> {
    if secs == 0 {
        None
    } else {
        Some(Duration::from_secs(secs))
    }
}

fn get_env_parsed<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| parse_or_none(&v))
        .unwrap_or(default)
}

fn parse_or_none<T: std::str::FromStr>(raw: &str) -> Option<T> {
    raw.trim().parse().ok()
}

#[test]
fn test_timeout_from_secs() {
    assert_eq!(timeout_from_secs(0), None);
    assert_eq!(timeout_from_secs(5), Some(Duration::from_secs(5)));
}

#[test]
fn test_parse_or_none() {
    assert_eq!(parse_or_none::<u64>(" 12 "), Some(12));
    assert_eq!(parse_or_none::<u64>("soon"), None);
    assert_eq!(parse_or_none::<tracing::Level>("debug"), Some(tracing::Level::DEBUG));
    assert_eq!(parse_or_none::<tracing::Level>("loud"), None);
}

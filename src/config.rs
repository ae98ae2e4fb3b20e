use std::env;
use std::time::Duration;

use reqwest::Url;

use crate::services::connectivity::ProbePolicy;

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";
const DEFAULT_PROBE_FALLBACK_URL: &str = "https://www.google.com/favicon.ico";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub api_url: String,
    pub public_url: String,
    pub probe_fallback_url: String,
    pub probe_policy: ProbePolicy,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = ProbePolicy::default();
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            api_url: resolve_api_url(env::var("VITE_API_URL").ok().as_deref()),
            public_url: env::var("PUBLIC_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            probe_fallback_url: env::var("PROBE_FALLBACK_URL")
                .unwrap_or_else(|_| DEFAULT_PROBE_FALLBACK_URL.to_string()),
            probe_policy: ProbePolicy {
                online_interval: secs_var("PROBE_ONLINE_INTERVAL_SECS")
                    .unwrap_or(defaults.online_interval),
                offline_interval: secs_var("PROBE_OFFLINE_INTERVAL_SECS")
                    .unwrap_or(defaults.offline_interval),
                offline_max_interval: secs_var("PROBE_OFFLINE_MAX_INTERVAL_SECS")
                    .unwrap_or(defaults.offline_max_interval),
                backoff_factor: env::var("PROBE_BACKOFF_FACTOR")
                    .ok()
                    .and_then(|v| v.parse::<f64>().ok())
                    .filter(|f| f.is_finite() && *f >= 1.0)
                    .unwrap_or(defaults.backoff_factor),
                timeout: secs_var("PROBE_TIMEOUT_SECS").unwrap_or(defaults.timeout),
                confirmation: secs_var("RESTORED_CONFIRMATION_SECS")
                    .unwrap_or(defaults.confirmation),
            },
        }
    }

    /// Cookies carry the `Secure` attribute when the console is served over HTTPS.
    pub fn serves_https(&self) -> bool {
        self.public_url.starts_with("https://")
    }
}

/// Longest interval any probe setting may take.
pub const MAX_PROBE_SECS: u64 = 24 * 60 * 60;

fn secs_var(name: &str) -> Option<Duration> {
    let raw = env::var(name).ok()?;
    let secs = parse_secs(&raw);
    if secs.is_none() {
        tracing::warn!("{name}={raw:?} is not a positive number of seconds, using the default");
    }
    secs
}

/// Positive whole seconds, capped at `MAX_PROBE_SECS`. Zero would make the
/// probe loop spin.
pub fn parse_secs(raw: &str) -> Option<Duration> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .filter(|secs| *secs > 0)
        .map(|secs| Duration::from_secs(secs.min(MAX_PROBE_SECS)))
}

/// Picks the upstream base URL, falling back to the local default when the
/// value is missing or not an absolute http(s) URL.
pub fn resolve_api_url(raw: Option<&str>) -> String {
    let Some(raw) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return DEFAULT_API_URL.to_string();
    };

    match Url::parse(raw) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.host().is_some() => {
            raw.trim_end_matches('/').to_string()
        }
        _ => {
            tracing::warn!("VITE_API_URL {raw:?} is malformed, using {DEFAULT_API_URL}");
            DEFAULT_API_URL.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_url_fallbacks() {
        assert_eq!(resolve_api_url(None), DEFAULT_API_URL);
        assert_eq!(resolve_api_url(Some("   ")), DEFAULT_API_URL);
        assert_eq!(resolve_api_url(Some("not a url")), DEFAULT_API_URL);
        assert_eq!(resolve_api_url(Some("ftp://example.com")), DEFAULT_API_URL);
    }

    #[test]
    fn test_probe_seconds_bounds() {
        assert_eq!(parse_secs("0"), None);
        assert_eq!(parse_secs("-5"), None);
        assert_eq!(parse_secs("soon"), None);
        assert_eq!(parse_secs(" 15 "), Some(Duration::from_secs(15)));
        assert_eq!(
            parse_secs("18446744073709551615"),
            Some(Duration::from_secs(MAX_PROBE_SECS))
        );
    }

    #[test]
    fn test_api_url_trailing_slash_trimmed() {
        assert_eq!(
            resolve_api_url(Some("https://api.example.com/v1/")),
            "https://api.example.com/v1"
        );
    }
}

use crate::countries::DEFAULT_CACHE_TTL_DAYS;
use std::{env, fmt::Display, path::PathBuf, str::FromStr, time::Duration};
use tracing::{debug, warn};

pub const MAX_LOG_FETCH_LIMIT: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Features {
    pub travel_report: bool,
    pub country_collection: bool,
    pub heatmap: bool,
}

impl Default for Features {
    fn default() -> Self {
        Self {
            travel_report: true,
            country_collection: true,
            heatmap: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_path: PathBuf,
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub page_size: usize,
    pub log_fetch_limit: usize,
    pub country_cache_ttl_days: i64,
    pub backend_timeout: Duration,
    pub features: Features,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {key} value '{value}': {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let page_size: usize = try_load(&lookup, "PAGE_SIZE", 12)?;
        if page_size == 0 {
            return Err(invalid("PAGE_SIZE", "0", "must be positive"));
        }

        let log_fetch_limit: usize = try_load(&lookup, "LOG_FETCH_LIMIT", MAX_LOG_FETCH_LIMIT)?;
        if log_fetch_limit == 0 || log_fetch_limit > MAX_LOG_FETCH_LIMIT {
            return Err(invalid(
                "LOG_FETCH_LIMIT",
                &log_fetch_limit.to_string(),
                format!("must be within 1..={MAX_LOG_FETCH_LIMIT}"),
            ));
        }

        let supabase_url: String =
            try_load(&lookup, "SUPABASE_URL", "http://127.0.0.1:54321".to_string())?;
        let supabase_url = supabase_url.trim_end_matches('/').to_string();
        if !supabase_url.starts_with("http://") && !supabase_url.starts_with("https://") {
            return Err(invalid("SUPABASE_URL", &supabase_url, "expected an http(s) URL"));
        }

        let supabase_anon_key = lookup("SUPABASE_ANON_KEY").unwrap_or_else(|| {
            warn!("SUPABASE_ANON_KEY not set, backend requests will be anonymous");
            String::new()
        });

        Ok(Self {
            port: try_load(&lookup, "PORT", 8080)?,
            data_path: PathBuf::from(try_load(
                &lookup,
                "APP_DATA_PATH",
                "data/state.json".to_string(),
            )?),
            supabase_url,
            supabase_anon_key,
            page_size,
            log_fetch_limit,
            country_cache_ttl_days: try_load(
                &lookup,
                "COUNTRY_CACHE_TTL_DAYS",
                DEFAULT_CACHE_TTL_DAYS,
            )?,
            backend_timeout: Duration::from_secs(try_load(&lookup, "BACKEND_TIMEOUT_SECS", 15)?),
            features: Features {
                travel_report: flag(&lookup, "FEATURE_TRAVEL_REPORT", true)?,
                country_collection: flag(&lookup, "FEATURE_COUNTRY_COLLECTION", true)?,
                heatmap: flag(&lookup, "FEATURE_HEATMAP", true)?,
            },
        })
    }
}

fn invalid(key: &'static str, value: &str, reason: impl Display) -> ConfigError {
    ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn try_load<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr + Display,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|e| invalid(key, &raw, e)),
        None => {
            debug!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}

fn flag(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: bool,
) -> Result<bool, ConfigError> {
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Ok(true),
        "0" | "false" | "off" | "no" => Ok(false),
        _ => Err(invalid(key, &raw, "expected a boolean")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.data_path, PathBuf::from("data/state.json"));
        assert_eq!(config.page_size, 12);
        assert_eq!(config.log_fetch_limit, MAX_LOG_FETCH_LIMIT);
        assert_eq!(config.country_cache_ttl_days, 30);
        assert_eq!(config.backend_timeout, Duration::from_secs(15));
        assert_eq!(config.features, Features::default());
    }

    #[test]
    fn values_are_parsed_and_trimmed() {
        let config = config(&[
            ("PORT", " 9000 "),
            ("SUPABASE_URL", "https://demo.supabase.co/"),
            ("FEATURE_HEATMAP", "off"),
            ("LOG_FETCH_LIMIT", "250"),
        ])
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.supabase_url, "https://demo.supabase.co");
        assert!(!config.features.heatmap);
        assert!(config.features.travel_report);
        assert_eq!(config.log_fetch_limit, 250);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            config(&[("PORT", "eighty")]),
            Err(ConfigError::Invalid { key: "PORT", .. })
        ));
        assert!(matches!(
            config(&[("LOG_FETCH_LIMIT", "5000")]),
            Err(ConfigError::Invalid {
                key: "LOG_FETCH_LIMIT",
                ..
            })
        ));
        assert!(matches!(
            config(&[("FEATURE_TRAVEL_REPORT", "maybe")]),
            Err(ConfigError::Invalid { .. })
        ));
        assert!(config(&[("SUPABASE_URL", "ftp://x")]).is_err());
    }
}

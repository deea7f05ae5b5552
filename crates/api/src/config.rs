use std::env;
use std::time::Duration;

pub const DEFAULT_ORIGIN: &str = "http://localhost:5500";

/// Server settings, read once from `PIZZA_*` environment variables. Values
/// that are missing or do not parse fall back to the defaults.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind: String,
    pub rng_seed: Option<u64>,
    pub rate_limit_window: Duration,
    pub rate_limit_max: usize,
    pub max_body_bytes: usize,
    pub allowed_origins: Vec<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".to_string(),
            rng_seed: None,
            rate_limit_window: Duration::from_secs(60),
            rate_limit_max: 120,
            max_body_bytes: 16 * 1024,
            allowed_origins: vec![DEFAULT_ORIGIN.to_string()],
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let bind = lookup("PIZZA_BIND")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or(defaults.bind);
        let rng_seed = lookup("PIZZA_RNG_SEED").and_then(|value| value.trim().parse::<u64>().ok());
        let rate_limit_window = lookup("PIZZA_RATE_LIMIT_WINDOW_SECONDS")
            .and_then(|value| value.trim().parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.rate_limit_window);
        let rate_limit_max = lookup("PIZZA_RATE_LIMIT_MAX")
            .and_then(|value| value.trim().parse::<usize>().ok())
            .filter(|value| *value > 0)
            .unwrap_or(defaults.rate_limit_max);
        let max_body_bytes = lookup("PIZZA_MAX_BODY_BYTES")
            .and_then(|value| value.trim().parse::<usize>().ok())
            .filter(|value| *value > 0)
            .unwrap_or(defaults.max_body_bytes);
        let allowed_origins = lookup("PIZZA_ALLOWED_ORIGINS")
            .map(|value| parse_origins(&value))
            .filter(|origins| !origins.is_empty())
            .unwrap_or(defaults.allowed_origins);

        Self {
            bind,
            rng_seed,
            rate_limit_window,
            rate_limit_max,
            max_body_bytes,
            allowed_origins,
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|origin| origin.trim().trim_end_matches('/').to_string())
        .filter(|origin| !origin.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> ApiConfig {
        let vars = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();
        ApiConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.bind, "0.0.0.0:8080");
        assert_eq!(config.rng_seed, None);
        assert_eq!(config.rate_limit_max, 120);
        assert_eq!(config.allowed_origins, vec![DEFAULT_ORIGIN.to_string()]);
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("PIZZA_BIND", "127.0.0.1:3000"),
            ("PIZZA_RNG_SEED", "99"),
            ("PIZZA_RATE_LIMIT_WINDOW_SECONDS", "5"),
            ("PIZZA_ALLOWED_ORIGINS", "https://pizza.example/, http://localhost:3000"),
        ]);
        assert_eq!(config.bind, "127.0.0.1:3000");
        assert_eq!(config.rng_seed, Some(99));
        assert_eq!(config.rate_limit_window, Duration::from_secs(5));
        assert_eq!(
            config.allowed_origins,
            vec![
                "https://pizza.example".to_string(),
                "http://localhost:3000".to_string()
            ]
        );
    }

    #[test]
    fn bad_numbers_fall_back() {
        let config = config_from(&[
            ("PIZZA_RATE_LIMIT_MAX", "lots"),
            ("PIZZA_MAX_BODY_BYTES", "0"),
            ("PIZZA_RNG_SEED", "-1"),
        ]);
        assert_eq!(config.rate_limit_max, 120);
        assert_eq!(config.max_body_bytes, 16 * 1024);
        assert_eq!(config.rng_seed, None);
    }
}

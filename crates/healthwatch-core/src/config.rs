use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let raw = or_default(var, default);
        let value = raw
            .parse::<f64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })?;
        if !value.is_finite() || value <= 0.0 {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("must be a positive finite number, got {raw}"),
            });
        }
        Ok(value)
    };

    let database_url = require("DATABASE_URL")?;

    let env = parse_environment(&or_default("HEALTHWATCH_ENV", "development"));

    let bind_addr = parse_addr("HEALTHWATCH_BIND_ADDR", "0.0.0.0:5000")?;
    let log_level = or_default("HEALTHWATCH_LOG_LEVEL", "info");

    let hf_api_key = lookup("HF_API_KEY").ok().filter(|k| !k.trim().is_empty());
    let insight_base_url = or_default(
        "HEALTHWATCH_INSIGHT_BASE_URL",
        "https://router.huggingface.co/v1",
    );
    let insight_model = or_default("HEALTHWATCH_INSIGHT_MODEL", "openai/gpt-oss-120b:groq");
    let insight_timeout_secs = parse_u64("HEALTHWATCH_INSIGHT_TIMEOUT_SECS", "20")?;

    let overpass_base_url = or_default(
        "HEALTHWATCH_OVERPASS_URL",
        "https://overpass-api.de/api/interpreter",
    );
    let locator_radius_km = parse_f64("HEALTHWATCH_LOCATOR_RADIUS_KM", "15")?;
    let locator_timeout_secs = parse_u64("HEALTHWATCH_LOCATOR_TIMEOUT_SECS", "15")?;
    let locator_category = or_default("HEALTHWATCH_LOCATOR_CATEGORY", "hospital");

    let http_user_agent = or_default(
        "HEALTHWATCH_USER_AGENT",
        "healthwatch/0.1 (patient-monitoring)",
    );

    let db_max_connections = parse_u32("HEALTHWATCH_DB_MAX_CONNECTIONS", "5")?;
    let db_min_connections = parse_u32("HEALTHWATCH_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs = parse_u64("HEALTHWATCH_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    Ok(AppConfig {
        database_url,
        env,
        bind_addr,
        log_level,
        hf_api_key,
        insight_base_url,
        insight_model,
        insight_timeout_secs,
        overpass_base_url,
        locator_radius_km,
        locator_timeout_secs,
        locator_category,
        http_user_agent,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    /// Returns a map with all required env vars populated with valid defaults.
    fn full_env<'a>() -> HashMap<&'a str, &'a str> {
        let mut m = HashMap::new();
        m.insert("DATABASE_URL", "sqlite://healthwatch.db");
        m
    }

    #[test]
    fn parse_environment_production() {
        assert_eq!(parse_environment("production"), Environment::Production);
    }

    #[test]
    fn parse_environment_unknown_defaults_to_development() {
        assert_eq!(parse_environment("staging"), Environment::Development);
    }

    #[test]
    fn build_app_config_fails_without_database_url() {
        let map: HashMap<&str, &str> = HashMap::new();
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "DATABASE_URL"),
            "expected MissingEnvVar(DATABASE_URL), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_fails_with_invalid_bind_addr() {
        let mut map = full_env();
        map.insert("HEALTHWATCH_BIND_ADDR", "not-a-socket-addr");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "HEALTHWATCH_BIND_ADDR"),
            "expected InvalidEnvVar(HEALTHWATCH_BIND_ADDR), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_succeeds_with_all_required_vars() {
        let map = full_env();
        let result = build_app_config(lookup_from_map(&map));
        assert!(result.is_ok(), "expected Ok, got: {result:?}");
        let cfg = result.unwrap();
        assert_eq!(cfg.env, Environment::Development);
        assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:5000");
        assert_eq!(cfg.log_level, "info");
        assert!(cfg.hf_api_key.is_none());
        assert_eq!(cfg.insight_model, "openai/gpt-oss-120b:groq");
        assert_eq!(cfg.insight_timeout_secs, 20);
        assert_eq!(
            cfg.overpass_base_url,
            "https://overpass-api.de/api/interpreter"
        );
        assert!((cfg.locator_radius_km - 15.0).abs() < f64::EPSILON);
        assert_eq!(cfg.locator_timeout_secs, 15);
        assert_eq!(cfg.locator_category, "hospital");
        assert_eq!(cfg.db_max_connections, 5);
    }

    #[test]
    fn hf_api_key_blank_is_treated_as_unset() {
        let mut map = full_env();
        map.insert("HF_API_KEY", "   ");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert!(cfg.hf_api_key.is_none());
    }

    #[test]
    fn hf_api_key_present_is_kept() {
        let mut map = full_env();
        map.insert("HF_API_KEY", "hf_secret");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.hf_api_key.as_deref(), Some("hf_secret"));
    }

    #[test]
    fn locator_radius_km_override() {
        let mut map = full_env();
        map.insert("HEALTHWATCH_LOCATOR_RADIUS_KM", "7.5");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert!((cfg.locator_radius_km - 7.5).abs() < f64::EPSILON);
    }

    #[test]
    fn locator_radius_km_rejects_non_positive() {
        let mut map = full_env();
        map.insert("HEALTHWATCH_LOCATOR_RADIUS_KM", "0");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "HEALTHWATCH_LOCATOR_RADIUS_KM"),
            "expected InvalidEnvVar(HEALTHWATCH_LOCATOR_RADIUS_KM), got: {result:?}"
        );
    }

    #[test]
    fn locator_radius_km_rejects_garbage() {
        let mut map = full_env();
        map.insert("HEALTHWATCH_LOCATOR_RADIUS_KM", "close-by");
        let result = build_app_config(lookup_from_map(&map));
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar { .. })));
    }

    #[test]
    fn locator_category_override() {
        let mut map = full_env();
        map.insert("HEALTHWATCH_LOCATOR_CATEGORY", "clinic");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.locator_category, "clinic");
    }

    #[test]
    fn insight_timeout_secs_invalid() {
        let mut map = full_env();
        map.insert("HEALTHWATCH_INSIGHT_TIMEOUT_SECS", "soon");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "HEALTHWATCH_INSIGHT_TIMEOUT_SECS"),
            "expected InvalidEnvVar(HEALTHWATCH_INSIGHT_TIMEOUT_SECS), got: {result:?}"
        );
    }

    #[test]
    fn db_max_connections_override() {
        let mut map = full_env();
        map.insert("HEALTHWATCH_DB_MAX_CONNECTIONS", "12");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.db_max_connections, 12);
    }

    #[test]
    fn debug_redacts_secrets() {
        let mut map = full_env();
        map.insert("HF_API_KEY", "hf_secret");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("hf_secret"));
        assert!(!rendered.contains("healthwatch.db"));
    }
}

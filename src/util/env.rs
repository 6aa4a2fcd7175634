//! Environment helpers: centralized dotenv loading and ergonomic getters.
//! Call `init_env()` once early in each binary (or rely on lazy Once).
use std::str::FromStr;
use std::sync::Once;
use tracing::info;

static INIT: Once = Once::new();

/// Load `.env` exactly once: the working directory first, then the crate root.
/// Safe to call many times.
pub fn init_env() {
    INIT.call_once(|| {
        if dotenv::dotenv().is_ok() {
            return;
        }
        let candidate = format!("{}/.env", env!("CARGO_MANIFEST_DIR"));
        let _ = dotenv::from_filename(candidate);
    });
}

/// Common bootstrap for binaries: load env and log a redacted snapshot of the
/// settings this crate reads.
pub fn bootstrap_cli(bin_name: &str) {
    init_env();
    let snapshot: Vec<(&str, String)> = crate::config::ENV_KEYS
        .iter()
        .map(|&k| (k, redact_value(k, &env_opt(k).unwrap_or_default())))
        .collect();
    info!(target = "bootstrap", bin = bin_name, snapshot = ?snapshot, "configuration snapshot");
}

/// Get optional env var (None if unset or empty).
pub fn env_opt(key: &str) -> Option<String> {
    init_env();
    match std::env::var(key) {
        Ok(v) if !v.trim().is_empty() => Some(v),
        _ => None,
    }
}

/// Get parsed value with default fallback.
pub fn env_parse<T>(key: &str, default: T) -> T
where
    T: FromStr,
{
    init_env();
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse::<T>().unwrap_or(default),
        Err(_) => default,
    }
}

// Database URLs may embed credentials; keep only the scheme.
fn redact_value(key: &str, value: &str) -> String {
    let val_trim = value.trim();
    if val_trim.is_empty() {
        return "<unset>".to_string();
    }
    if key.ends_with("_URL") {
        if let Some((scheme, _)) = val_trim.split_once(':') {
            return format!("{scheme}:<redacted>");
        }
        return "<redacted>".to_string();
    }
    val_trim.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redacts_urls_but_not_plain_values() {
        assert_eq!(
            redact_value("DATABASE_URL", "sqlite://secret/games.db"),
            "sqlite:<redacted>"
        );
        assert_eq!(redact_value("API_PORT", " 8080 "), "8080");
        assert_eq!(redact_value("CATALOG_DIR", ""), "<unset>");
    }

    #[test]
    fn parse_falls_back_on_garbage() {
        std::env::set_var("APP_CATALOG_TEST_PORT", "not-a-number");
        assert_eq!(env_parse("APP_CATALOG_TEST_PORT", 8080u16), 8080);
        std::env::set_var("APP_CATALOG_TEST_PORT", " 9000 ");
        assert_eq!(env_parse("APP_CATALOG_TEST_PORT", 8080u16), 9000);
        std::env::remove_var("APP_CATALOG_TEST_PORT");
    }
}

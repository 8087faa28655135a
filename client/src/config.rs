//! Client constants and environment-driven configuration.

pub const DEFAULT_API_ROOT: &str = "http://127.0.0.1:8080";
/// Storage key of the auth token (raw string).
pub const TOKEN_KEY: &str = "TOKEN_KEY";
/// Storage key of the last known position (JSON `{lat, lon}`).
pub const POS_KEY: &str = "POS_KEY";
/// Scheme prefix of the `Authorization` header.
pub const AUTH_HEADER: &str = "Bearer";
/// Default jitter magnitude, in degrees, applied to outgoing coordinates.
pub const LOC_SHAKE: f64 = 0.02;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL the REST paths are appended to. Never ends with `/`.
    pub api_root: String,
    pub auth_scheme: String,
    pub loc_shake: f64,
    /// Radius of the nearby-post search; server default when `None`.
    pub search_range_km: Option<f64>,
    pub request_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_root: DEFAULT_API_ROOT.to_owned(),
            auth_scheme: AUTH_HEADER.to_owned(),
            loc_shake: LOC_SHAKE,
            search_range_km: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `AROUND_API_ROOT`: default `http://127.0.0.1:8080`
    /// - `AROUND_AUTH_SCHEME`: default `Bearer`
    /// - `AROUND_LOC_SHAKE`: jitter magnitude in degrees, default 0.02
    /// - `AROUND_SEARCH_RANGE_KM`: nearby search radius
    /// - `AROUND_REQUEST_TIMEOUT_SECS`: default 30
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a numeric variable does not parse
    /// or is negative.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] with an injectable variable source.
    ///
    /// # Errors
    ///
    /// See [`ClientConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let api_root = lookup("AROUND_API_ROOT")
            .map(|v| v.trim().trim_end_matches('/').to_owned())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.api_root);
        let auth_scheme = lookup("AROUND_AUTH_SCHEME")
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.auth_scheme);

        let loc_shake = match lookup("AROUND_LOC_SHAKE") {
            Some(raw) => parse_non_negative("AROUND_LOC_SHAKE", &raw)?,
            None => defaults.loc_shake,
        };
        let search_range_km = lookup("AROUND_SEARCH_RANGE_KM")
            .map(|raw| parse_non_negative("AROUND_SEARCH_RANGE_KM", &raw))
            .transpose()?;
        let request_timeout_secs = match lookup("AROUND_REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::Invalid { var: "AROUND_REQUEST_TIMEOUT_SECS", value: raw })?,
            None => defaults.request_timeout_secs,
        };

        Ok(Self { api_root, auth_scheme, loc_shake, search_range_km, request_timeout_secs })
    }
}

fn parse_non_negative(var: &'static str, raw: &str) -> Result<f64, ConfigError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
        .ok_or_else(|| ConfigError::Invalid { var, value: raw.to_owned() })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

//! Configuration for the finance tools.

use std::env;
use std::fmt;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Default Coinlore API base URL.
pub const DEFAULT_COINLORE_URL: &str = "https://api.coinlore.net";

/// Default AwesomeAPI (economia) base URL.
pub const DEFAULT_AWESOMEAPI_URL: &str = "https://economia.awesomeapi.com.br";

/// Default Alpha Vantage base URL.
pub const DEFAULT_ALPHAVANTAGE_URL: &str = "https://www.alphavantage.co";

/// Environment variable holding the Alpha Vantage key.
///
/// The spelling matches existing deployments.
pub const API_KEY_VAR: &str = "ALPHAVANTEGE_API_KEY";

/// Correctly spelled key variable, used when [`API_KEY_VAR`] is unset.
pub const API_KEY_FALLBACK_VAR: &str = "ALPHAVANTAGE_API_KEY";

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_SYMBOL_MATCHES: usize = 3;
const MAX_SYMBOL_MATCHES_VAR: &str = "FINANCE_TOOLS_MAX_SYMBOL_MATCHES";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("ALPHAVANTEGE_API_KEY environment variable is required")]
    MissingApiKey,

    #[error("Invalid URL in {var}: {reason}")]
    InvalidUrl { var: &'static str, reason: String },

    #[error("Invalid number in {var}: {value}")]
    InvalidNumber { var: &'static str, value: String },

    #[error("Failed to create HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Configuration shared by all finance tools.
#[derive(Clone)]
pub struct FinanceToolsConfig {
    /// Alpha Vantage API key (symbol search, stock price, market status).
    pub alpha_vantage_api_key: String,

    /// Coinlore base URL (crypto info).
    pub coinlore_url: Url,

    /// AwesomeAPI base URL (exchange rates).
    pub awesomeapi_url: Url,

    /// Alpha Vantage base URL.
    pub alpha_vantage_url: Url,

    /// Per-request timeout. `None` waits forever.
    pub http_timeout: Option<Duration>,

    /// User agent sent upstream.
    pub user_agent: String,

    /// Maximum symbol-search matches reported.
    pub max_symbol_matches: usize,
}

impl Default for FinanceToolsConfig {
    fn default() -> Self {
        Self {
            alpha_vantage_api_key: String::new(),
            coinlore_url: default_url(DEFAULT_COINLORE_URL),
            awesomeapi_url: default_url(DEFAULT_AWESOMEAPI_URL),
            alpha_vantage_url: default_url(DEFAULT_ALPHAVANTAGE_URL),
            http_timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            user_agent: format!("finance-tools/{}", env!("CARGO_PKG_VERSION")),
            max_symbol_matches: DEFAULT_MAX_SYMBOL_MATCHES,
        }
    }
}

// The API key must never end up in logs.
impl fmt::Debug for FinanceToolsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FinanceToolsConfig")
            .field("alpha_vantage_api_key", &"<redacted>")
            .field("coinlore_url", &self.coinlore_url.as_str())
            .field("awesomeapi_url", &self.awesomeapi_url.as_str())
            .field("alpha_vantage_url", &self.alpha_vantage_url.as_str())
            .field("http_timeout", &self.http_timeout)
            .field("user_agent", &self.user_agent)
            .field("max_symbol_matches", &self.max_symbol_matches)
            .finish()
    }
}

impl FinanceToolsConfig {
    /// Create configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `ALPHAVANTEGE_API_KEY` | Alpha Vantage key | (required) |
    /// | `ALPHAVANTAGE_API_KEY` | Used when the above is unset | |
    /// | `COINLORE_API_URL` | Coinlore base URL | `https://api.coinlore.net` |
    /// | `AWESOMEAPI_URL` | AwesomeAPI base URL | `https://economia.awesomeapi.com.br` |
    /// | `ALPHAVANTAGE_API_URL` | Alpha Vantage base URL | `https://www.alphavantage.co` |
    /// | `FINANCE_TOOLS_HTTP_TIMEOUT_SECS` | Request timeout, `0` disables | `30` |
    /// | `FINANCE_TOOLS_MAX_SYMBOL_MATCHES` | Symbol search result cap | `3` |
    pub fn from_env() -> Result<Self, ConfigError> {
        let alpha_vantage_api_key = non_blank_var(API_KEY_VAR)
            .or_else(|| non_blank_var(API_KEY_FALLBACK_VAR))
            .ok_or(ConfigError::MissingApiKey)?;

        let coinlore_url = url_var("COINLORE_API_URL", DEFAULT_COINLORE_URL)?;
        let awesomeapi_url = url_var("AWESOMEAPI_URL", DEFAULT_AWESOMEAPI_URL)?;
        let alpha_vantage_url = url_var("ALPHAVANTAGE_API_URL", DEFAULT_ALPHAVANTAGE_URL)?;

        let timeout_secs: u64 =
            number_var("FINANCE_TOOLS_HTTP_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
        let http_timeout = (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs));

        let max_symbol_matches = number_var(MAX_SYMBOL_MATCHES_VAR, DEFAULT_MAX_SYMBOL_MATCHES)?;

        let config = Self {
            alpha_vantage_api_key,
            coinlore_url,
            awesomeapi_url,
            alpha_vantage_url,
            http_timeout,
            max_symbol_matches,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Create a new config builder.
    pub fn builder() -> FinanceToolsConfigBuilder {
        FinanceToolsConfigBuilder::default()
    }

    /// Check the configuration is usable.
    ///
    /// The API key must be non-blank and at least one symbol match must be
    /// reported.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.alpha_vantage_api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        if self.max_symbol_matches == 0 {
            return Err(ConfigError::InvalidNumber {
                var: MAX_SYMBOL_MATCHES_VAR,
                value: "0".to_string(),
            });
        }
        Ok(())
    }

    /// Build the HTTP client shared by every tool.
    pub(crate) fn http_client(&self) -> Result<reqwest::Client, ConfigError> {
        let mut builder = reqwest::Client::builder().user_agent(&self.user_agent);
        if let Some(timeout) = self.http_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(builder.build()?)
    }
}

/// Builder for FinanceToolsConfig.
#[derive(Debug, Default)]
pub struct FinanceToolsConfigBuilder {
    config: FinanceToolsConfig,
}

impl FinanceToolsConfigBuilder {
    /// Set the Alpha Vantage API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.alpha_vantage_api_key = key.into();
        self
    }

    /// Set the Coinlore base URL.
    pub fn coinlore_url(mut self, url: Url) -> Self {
        self.config.coinlore_url = url;
        self
    }

    /// Set the AwesomeAPI base URL.
    pub fn awesomeapi_url(mut self, url: Url) -> Self {
        self.config.awesomeapi_url = url;
        self
    }

    /// Set the Alpha Vantage base URL.
    pub fn alpha_vantage_url(mut self, url: Url) -> Self {
        self.config.alpha_vantage_url = url;
        self
    }

    /// Point every provider at the same base URL.
    pub fn all_urls(self, url: Url) -> Self {
        self.coinlore_url(url.clone())
            .awesomeapi_url(url.clone())
            .alpha_vantage_url(url)
    }

    /// Set the per-request timeout (`None` disables it).
    pub fn http_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.config.http_timeout = timeout;
        self
    }

    /// Set the user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Set the symbol-search result cap.
    pub fn max_symbol_matches(mut self, max: usize) -> Self {
        self.config.max_symbol_matches = max;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> FinanceToolsConfig {
        self.config
    }
}

fn default_url(raw: &str) -> Url {
    Url::parse(raw).unwrap_or_else(|e| panic!("built-in URL {raw} is invalid: {e}"))
}

fn non_blank_var(var: &str) -> Option<String> {
    env::var(var)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn url_var(var: &'static str, default: &str) -> Result<Url, ConfigError> {
    let raw = env::var(var).unwrap_or_else(|_| default.to_string());
    Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl {
        var,
        reason: e.to_string(),
    })
}

fn number_var<T: std::str::FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(var) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { var, value }),
        Err(_) => Ok(default),
    }
}

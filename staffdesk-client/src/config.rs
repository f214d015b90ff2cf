//! Client configuration

use std::time::Duration;

/// Client configuration for connecting to the employee API
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | STAFFDESK_API_URL | http://localhost:8080 | API base URL |
/// | STAFFDESK_TOKEN | - | Bearer token to use without logging in |
/// | STAFFDESK_TIMEOUT_SECS | - | Transport timeout (none when unset) |
/// | STAFFDESK_LOG_LEVEL | info | Log level (`RUST_LOG` wins) |
/// | STAFFDESK_LOG_JSON | false | JSON log lines |
/// | STAFFDESK_LOG_DIR | - | Directory for daily rotating log files |
/// | STAFFDESK_USERNAME / STAFFDESK_PASSWORD | - | Credentials for `POST /login` |
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:8080")
    pub base_url: String,

    /// Bearer token for authentication
    pub token: Option<String>,

    /// Request timeout; `None` leaves hung requests pending
    pub timeout: Option<Duration>,

    /// Log level used when `RUST_LOG` is unset
    pub log_level: String,

    /// Emit JSON log lines
    pub log_json: bool,

    /// Optional directory for file logging
    pub log_dir: Option<String>,

    /// Login credentials
    pub username: Option<String>,
    pub password: Option<String>,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: None,
            log_level: "info".into(),
            log_json: false,
            log_dir: None,
            username: None,
            password: None,
        }
    }

    /// Load configuration from the environment (and `.env`, if present)
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());

        let mut config =
            Self::new(var("STAFFDESK_API_URL").unwrap_or_else(|| "http://localhost:8080".into()));
        config.token = var("STAFFDESK_TOKEN");
        config.timeout = var("STAFFDESK_TIMEOUT_SECS")
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs);
        if let Some(level) = var("STAFFDESK_LOG_LEVEL") {
            config.log_level = level;
        }
        config.log_json = var("STAFFDESK_LOG_JSON")
            .and_then(|v| v.parse().ok())
            .unwrap_or(false);
        config.log_dir = var("STAFFDESK_LOG_DIR");
        config.username = var("STAFFDESK_USERNAME");
        config.password = var("STAFFDESK_PASSWORD");
        config
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set logging options
    pub fn with_logging(mut self, level: impl Into<String>, json: bool) -> Self {
        self.log_level = level.into();
        self.log_json = json;
        self
    }

    /// Set login credentials
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> crate::ClientResult<crate::NetworkHttpClient> {
        crate::NetworkHttpClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8080")
    }
}

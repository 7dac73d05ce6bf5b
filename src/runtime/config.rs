//! Todayd configuration.

use std::env;

/// Default Asana user-task-list tasks endpoint.
///
/// Overridable through `ASANA_TASK_LIST_URL` so the proxy is not tied to
/// one upstream list.
pub const DEFAULT_TASK_LIST_URL: &str =
    "https://app.asana.com/api/1.0/user_task_lists/1197488625310378/tasks";

/// Upstream (Asana) connection settings.
#[derive(Clone)]
pub struct UpstreamConfig {
    /// Task-list endpoint the proxy queries.
    pub task_list_url: String,
    /// Bearer credential attached to every upstream request.
    pub access_token: String,
    /// Upstream request timeout in seconds.
    pub request_timeout: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            task_list_url: DEFAULT_TASK_LIST_URL.to_string(),
            access_token: String::new(),
            request_timeout: 30,
        }
    }
}

// The credential must never reach logs, so Debug prints a placeholder.
impl std::fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("task_list_url", &self.task_list_url)
            .field("access_token", &"<redacted>")
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

/// Configuration for the todayd server, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Whether to enable the health check endpoint.
    pub enable_health: bool,
    /// Upstream connection settings.
    pub upstream: UpstreamConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            enable_health: true,
            upstream: UpstreamConfig::default(),
        }
    }
}

impl Config {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve configuration from the process environment.
    ///
    /// `PORT` is required; its absence is the one fatal startup
    /// condition and the caller must exit without binding a listener.
    /// `TONY_ACCESS_TOKEN` is optional here: without it every request
    /// fails upstream authorization, but the process still starts.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Resolve configuration from an arbitrary variable lookup.
    pub fn from_vars<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = get("PORT").ok_or(ConfigError::MissingPort)?;
        let port: u16 = port
            .parse()
            .map_err(|_| ConfigError::InvalidPort(port.clone()))?;

        let mut config = Self::default().port(port);

        if let Some(host) = get("HOST") {
            config = config.host(host);
        }
        if let Some(url) = get("ASANA_TASK_LIST_URL") {
            config = config.task_list_url(url);
        }
        if let Some(token) = get("TONY_ACCESS_TOKEN") {
            config = config.access_token(token);
        }

        Ok(config)
    }

    /// Set the host address.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the port.
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Enable or disable the health check endpoint.
    pub fn enable_health(mut self, enable: bool) -> Self {
        self.enable_health = enable;
        self
    }

    /// Set the upstream task-list URL.
    pub fn task_list_url(mut self, url: impl Into<String>) -> Self {
        self.upstream.task_list_url = url.into();
        self
    }

    /// Set the upstream bearer credential.
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.upstream.access_token = token.into();
        self
    }

    /// Set the upstream request timeout in seconds.
    pub fn request_timeout(mut self, seconds: u64) -> Self {
        self.upstream.request_timeout = seconds;
        self
    }

    /// Get the bind address.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Startup configuration error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `PORT` is not set.
    MissingPort,
    /// `PORT` is set but is not a valid port number.
    InvalidPort(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::MissingPort => write!(f, "$PORT not set"),
            ConfigError::InvalidPort(value) => write!(f, "invalid $PORT value: {}", value),
        }
    }
}

impl std::error::Error for ConfigError {}

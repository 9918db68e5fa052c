//! Configuration for respkv
//!
//! Centralized configuration with sensible defaults.

/// Connection configuration for a respkv client
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// Server hostname or IP address
    pub host: String,

    /// Server TCP port
    pub port: u16,

    // -------------------------------------------------------------------------
    // Authentication Configuration
    // -------------------------------------------------------------------------
    /// Username sent in the AUTH handshake
    pub username: String,

    /// Password sent in the AUTH handshake
    pub password: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 6379,
            username: String::new(),
            password: String::new(),
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// The `host:port` address string used for `TcpStream::connect`
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the server hostname or IP address
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set the server TCP port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Set the AUTH username
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.config.username = username.into();
        self
    }

    /// Set the AUTH password
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.config.password = password.into();
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

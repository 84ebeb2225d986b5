//! Connection configuration for [`TcpTransport`](super::TcpTransport).

use std::time::Duration;

/// Default submission port (STARTTLS required).
pub const SUBMISSION_PORT: u16 = 587;

/// Relay connection configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Relay hostname, also used as the TLS server name.
    pub host: String,
    /// Relay port.
    pub port: u16,
    /// Limit on DNS resolution plus TCP connect. `None` waits indefinitely.
    pub connect_timeout: Option<Duration>,
    /// Limit on each reply read and line write. `None` waits indefinitely.
    pub io_timeout: Option<Duration>,
}

impl Config {
    /// Creates a configuration for `host` on the submission port, with no
    /// timeouts.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self::builder(host).build()
    }

    /// Creates a configuration builder.
    #[must_use]
    pub fn builder(host: impl Into<String>) -> ConfigBuilder {
        ConfigBuilder::new(host)
    }
}

/// Builder for [`Config`].
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    host: String,
    port: u16,
    connect_timeout: Option<Duration>,
    io_timeout: Option<Duration>,
}

impl ConfigBuilder {
    /// Creates a new builder with the given hostname.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: SUBMISSION_PORT,
            connect_timeout: None,
            io_timeout: None,
        }
    }

    /// Sets the port.
    #[must_use]
    pub const fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the connection timeout.
    #[must_use]
    pub const fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets the I/O timeout.
    #[must_use]
    pub const fn io_timeout(mut self, timeout: Duration) -> Self {
        self.io_timeout = Some(timeout);
        self
    }

    /// Builds the configuration.
    #[must_use]
    pub fn build(self) -> Config {
        Config {
            host: self.host,
            port: self.port,
            connect_timeout: self.connect_timeout,
            io_timeout: self.io_timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_new() {
        let config = Config::new("smtp.example.com");
        assert_eq!(config.host, "smtp.example.com");
        assert_eq!(config.port, 587);
        assert_eq!(config.connect_timeout, None);
        assert_eq!(config.io_timeout, None);
    }

    #[test]
    fn test_config_builder() {
        let config = Config::builder("smtp.example.com")
            .port(2587)
            .connect_timeout(Duration::from_secs(10))
            .io_timeout(Duration::from_secs(30))
            .build();

        assert_eq!(config.port, 2587);
        assert_eq!(config.connect_timeout, Some(Duration::from_secs(10)));
        assert_eq!(config.io_timeout, Some(Duration::from_secs(30)));
    }
}

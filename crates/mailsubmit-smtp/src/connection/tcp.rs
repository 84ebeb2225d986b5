//! TCP transport with in-band TLS upgrade.

use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use rustls::pki_types::ServerName;
use tokio::io::BufReader;
use tokio::net::TcpStream;
use tokio_rustls::{
    TlsConnector,
    rustls::{ClientConfig, RootCertStore},
};
use tracing::{debug, info, trace};

use super::{Config, SmtpStream, Transport};
use crate::error::{Error, Result};
use crate::types::{Reply, ReplyCode};

/// Production [`Transport`] over `tokio` sockets and `rustls`.
#[derive(Debug)]
pub struct TcpTransport {
    config: Config,
    stream: Option<SmtpStream>,
    peer: Option<SocketAddr>,
    log_traffic: bool,
}

impl TcpTransport {
    /// Creates a disconnected transport for the configured relay.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self {
            config,
            stream: None,
            peer: None,
            log_traffic: false,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Returns true while a connection is open.
    #[must_use]
    pub const fn is_connected(&self) -> bool {
        self.stream.is_some()
    }

    /// Returns true once the connection has been upgraded to TLS.
    #[must_use]
    pub fn is_tls(&self) -> bool {
        self.stream.as_ref().is_some_and(SmtpStream::is_tls)
    }

    fn stream_mut(&mut self) -> Result<&mut SmtpStream> {
        self.stream.as_mut().ok_or(Error::NotConnected)
    }

    fn log_line(&self, direction: &str, line: &str) {
        if self.log_traffic {
            info!(target: "mailsubmit_smtp::wire", "{direction} {line}");
        } else {
            trace!(target: "mailsubmit_smtp::wire", "{direction} {line}");
        }
    }

    async fn send(&mut self, line: &str, logged: &str) -> Result<()> {
        let timeout = self.config.io_timeout;
        let stream = self.stream_mut()?;
        within(timeout, stream.write_line(line))
            .await
            .and_then(|written| written)
            .map_err(Error::Write)?;
        self.log_line(">>", logged);
        Ok(())
    }
}

impl Transport for TcpTransport {
    async fn connect(&mut self) -> Result<()> {
        self.disconnect();

        let addr = (self.config.host.as_str(), self.config.port);
        debug!(host = %self.config.host, port = self.config.port, "connecting");
        let tcp = within(self.config.connect_timeout, TcpStream::connect(addr))
            .await
            .and_then(|connected| connected)
            .map_err(Error::Connection)?;
        let peer = tcp.peer_addr().map_err(Error::Connection)?;

        debug!(%peer, "connected");
        self.peer = Some(peer);
        self.stream = Some(SmtpStream::Tcp(BufReader::new(tcp)));
        Ok(())
    }

    async fn enable_tls(&mut self) -> Result<()> {
        let tcp = match self.stream.take() {
            Some(SmtpStream::Tcp(reader)) => reader.into_inner(),
            Some(tls @ SmtpStream::Tls(_)) => {
                self.stream = Some(tls);
                return Err(Error::Tls("Already using TLS".into()));
            }
            None => return Err(Error::NotConnected),
        };

        let server_name = ServerName::try_from(self.config.host.clone())
            .map_err(|_| Error::Tls(format!("Invalid hostname: {}", self.config.host)))?;
        let handshake = create_tls_connector().connect(server_name, tcp);
        let tls = within(self.config.io_timeout, handshake)
            .await
            .and_then(|negotiated| negotiated)
            .map_err(|e| Error::Tls(e.to_string()))?;

        debug!(host = %self.config.host, "TLS established");
        self.stream = Some(SmtpStream::Tls(Box::new(BufReader::new(tls))));
        Ok(())
    }

    async fn read(&mut self, expected: ReplyCode) -> Result<Reply> {
        let timeout = self.config.io_timeout;
        let stream = self.stream_mut()?;
        let reply = within(timeout, stream.read_reply()).await??;

        for line in &reply.lines {
            self.log_line("<<", &format!("{} {line}", reply.code));
        }
        reply.expect(expected)
    }

    async fn write_line(&mut self, line: &str) -> Result<()> {
        self.send(line, line).await
    }

    async fn write_sensitive_line(&mut self, line: &str) -> Result<()> {
        self.send(line, "<credentials>").await
    }

    fn hostname(&self) -> String {
        self.peer.map(|peer| peer.ip().to_string()).unwrap_or_default()
    }

    fn disconnect(&mut self) {
        if self.stream.take().is_some() {
            debug!(host = %self.config.host, "disconnected");
        }
        self.peer = None;
    }

    fn enable_logging(&mut self) {
        self.log_traffic = true;
    }
}

/// Runs `fut` under an optional deadline.
async fn within<F: Future>(limit: Option<Duration>, fut: F) -> io::Result<F::Output> {
    match limit {
        Some(limit) => tokio::time::timeout(limit, fut)
            .await
            .map_err(|_| io::Error::new(io::ErrorKind::TimedOut, "operation timed out")),
        None => Ok(fut.await),
    }
}

/// Creates a TLS connector trusting the webpki root set.
fn create_tls_connector() -> TlsConnector {
    let root_store = RootCertStore {
        roots: webpki_roots::TLS_SERVER_ROOTS.to_vec(),
    };

    let config = ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth();

    TlsConnector::from(Arc::new(config))
}

//! Transport contract and its production implementation.
//!
//! The session engine only talks to a [`Transport`]; it never touches
//! sockets. [`TcpTransport`] is the real TCP/TLS implementation, and tests
//! substitute a scripted double.

mod config;
mod stream;
mod tcp;

pub use config::{Config, ConfigBuilder, SUBMISSION_PORT};
pub use stream::{SmtpStream, read_reply, write_line};
pub use tcp::TcpTransport;

use std::future::Future;

use crate::error::Result;
use crate::types::{Reply, ReplyCode};

/// One logical connection to a relay.
///
/// Connection state moves from not-connected to plaintext to TLS. Every
/// method takes `&mut self`; a transport serves one session at a time.
pub trait Transport {
    /// Opens the underlying connection.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Connection`](crate::Error::Connection) on DNS or TCP
    /// failure.
    fn connect(&mut self) -> impl Future<Output = Result<()>> + Send;

    /// Performs the TLS client handshake on the open connection. Called at
    /// most once per connection.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Tls`](crate::Error::Tls) if the handshake fails.
    fn enable_tls(&mut self) -> impl Future<Output = Result<()>> + Send;

    /// Reads one reply and checks its status code.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConnectionClosed`](crate::Error::ConnectionClosed) on
    /// a zero-byte read and
    /// [`Error::UnexpectedReply`](crate::Error::UnexpectedReply) when the code
    /// differs from `expected`.
    fn read(&mut self, expected: ReplyCode) -> impl Future<Output = Result<Reply>> + Send;

    /// Writes `line` followed by CRLF.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Write`](crate::Error::Write) on I/O failure.
    fn write_line(&mut self, line: &str) -> impl Future<Output = Result<()>> + Send;

    /// Writes a line that carries credentials. Implementations that log
    /// traffic must not log its content.
    ///
    /// # Errors
    ///
    /// Same as [`write_line`](Self::write_line).
    fn write_sensitive_line(&mut self, line: &str) -> impl Future<Output = Result<()>> + Send {
        self.write_line(line)
    }

    /// Resolved remote address of the live connection.
    fn hostname(&self) -> String;

    /// Releases the connection. Safe to call when not connected.
    fn disconnect(&mut self);

    /// Emits raw protocol traffic for diagnostics.
    fn enable_logging(&mut self);
}

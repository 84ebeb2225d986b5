//! Error types for SMTP submission.

use std::io;

use crate::types::ReplyCode;

/// Result type alias for SMTP operations.
pub type Result<T> = std::result::Result<T, Error>;

/// SMTP error types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// DNS resolution or TCP connect failed.
    #[error("Connection failed: {0}")]
    Connection(#[source] io::Error),

    /// TLS handshake failed.
    #[error("TLS error: {0}")]
    Tls(String),

    /// Server replied with a status code other than the one expected.
    #[error("Expected status {expected}, received {code}: {message}")]
    UnexpectedReply {
        /// Code the protocol step required.
        expected: ReplyCode,
        /// Code the server sent.
        code: ReplyCode,
        /// Reply text from the server.
        message: String,
    },

    /// The server closed the connection while a reply was expected.
    #[error("The server closed the connection")]
    ConnectionClosed,

    /// Malformed reply.
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// I/O error while reading a reply.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Writing a command line failed.
    #[error("Write failed: {0}")]
    Write(#[source] io::Error),

    /// Operation needs a live connection.
    #[error("Not connected")]
    NotConnected,
}

/// Coarse classification of [`Error`] values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// DNS/TCP failure, or no connection at all.
    Connection,
    /// TLS handshake failure.
    Tls,
    /// Unexpected status code, malformed reply, or connection closed mid-read.
    Protocol,
    /// Write-level I/O failure.
    TransportWrite,
}

impl Error {
    /// Creates an unexpected-reply error.
    #[must_use]
    pub fn unexpected_reply(
        expected: ReplyCode,
        code: ReplyCode,
        message: impl Into<String>,
    ) -> Self {
        Self::UnexpectedReply {
            expected,
            code,
            message: message.into(),
        }
    }

    /// Returns the kind of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Connection(_) | Self::NotConnected => ErrorKind::Connection,
            Self::Tls(_) => ErrorKind::Tls,
            Self::UnexpectedReply { .. }
            | Self::ConnectionClosed
            | Self::Protocol(_)
            | Self::Io(_) => ErrorKind::Protocol,
            Self::Write(_) => ErrorKind::TransportWrite,
        }
    }

    /// Returns true if the server rejected the step permanently (5xx).
    #[must_use]
    pub const fn is_permanent(&self) -> bool {
        matches!(self, Self::UnexpectedReply { code, .. } if code.is_permanent())
    }

    /// Returns true if the server rejected the step transiently (4xx).
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::UnexpectedReply { code, .. } if code.is_transient())
    }
}

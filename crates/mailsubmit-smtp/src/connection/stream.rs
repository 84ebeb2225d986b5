//! Low-level SMTP stream handling.
//!
//! Replies are CRLF-terminated lines; a reply ends at the first line whose
//! code is not followed by `-`.

use std::io;

use tokio::io::{
    AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader,
};
use tokio::net::TcpStream;
use tokio_rustls::client::TlsStream;

use crate::error::{Error, Result};
use crate::parser::{is_last_reply_line, parse_reply};
use crate::types::Reply;

/// Maximum reply line length accepted from the server.
const MAX_LINE_LENGTH: u64 = 64 * 1024;

/// Maximum number of lines in one reply.
const MAX_REPLY_LINES: usize = 512;

/// SMTP stream (TCP or TLS).
#[derive(Debug)]
pub enum SmtpStream {
    /// Plain TCP connection, before STARTTLS.
    Tcp(BufReader<TcpStream>),
    /// TLS-encrypted connection.
    Tls(Box<BufReader<TlsStream<TcpStream>>>),
}

impl SmtpStream {
    /// Returns true once the stream has been upgraded.
    #[must_use]
    pub const fn is_tls(&self) -> bool {
        matches!(self, Self::Tls(_))
    }

    /// Reads one complete reply.
    ///
    /// # Errors
    ///
    /// See [`read_reply`].
    pub async fn read_reply(&mut self) -> Result<Reply> {
        match self {
            Self::Tcp(reader) => read_reply(reader).await,
            Self::Tls(reader) => read_reply(reader.as_mut()).await,
        }
    }

    /// Writes `line` followed by CRLF and flushes.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error.
    pub async fn write_line(&mut self, line: &str) -> io::Result<()> {
        match self {
            Self::Tcp(reader) => write_line(reader.get_mut(), line).await,
            Self::Tls(reader) => write_line(reader.get_mut(), line).await,
        }
    }
}

/// Reads lines until a complete reply has arrived and parses it.
///
/// # Errors
///
/// Returns [`Error::ConnectionClosed`] when the peer closes before a full
/// reply arrives, [`Error::Io`] on read failure, and [`Error::Protocol`]
/// for oversized or malformed lines and replies with more than
/// `MAX_REPLY_LINES` lines.
pub async fn read_reply<R>(reader: &mut R) -> Result<Reply>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = Vec::new();
    loop {
        let mut line = String::new();
        let read = (&mut *reader)
            .take(MAX_LINE_LENGTH)
            .read_line(&mut line)
            .await?;
        if read == 0 {
            return Err(Error::ConnectionClosed);
        }
        if !line.ends_with('\n') && read as u64 == MAX_LINE_LENGTH {
            return Err(Error::Protocol(format!(
                "Reply line exceeds {MAX_LINE_LENGTH} bytes"
            )));
        }

        let line = line.trim_end_matches(['\r', '\n']);
        if line.is_empty() {
            continue;
        }

        if lines.len() == MAX_REPLY_LINES {
            return Err(Error::Protocol(format!(
                "Reply exceeds {MAX_REPLY_LINES} lines"
            )));
        }

        let is_last = is_last_reply_line(line);
        lines.push(line.to_string());
        if is_last {
            break;
        }
    }

    parse_reply(&lines)
}

/// Writes `line` followed by CRLF as one buffer, then flushes.
///
/// # Errors
///
/// Returns the underlying I/O error.
pub async fn write_line<W>(writer: &mut W, line: &str) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::with_capacity(line.len() + 2);
    buf.extend_from_slice(line.as_bytes());
    buf.extend_from_slice(b"\r\n");
    writer.write_all(&buf).await?;
    writer.flush().await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::ReplyCode;
    use tokio_test::io::Builder;

    #[tokio::test]
    async fn test_read_single_line() {
        let mock = Builder::new().read(b"220 relay.example.com ESMTP\r\n").build();
        let mut reader = BufReader::new(mock);

        let reply = read_reply(&mut reader).await.unwrap();
        assert_eq!(reply.code, ReplyCode::SERVICE_READY);
        assert_eq!(reply.text(), "relay.example.com ESMTP");
    }

    #[tokio::test]
    async fn test_read_multi_line_split_across_reads() {
        let mock = Builder::new()
            .read(b"250-relay.example.com\r\n250-PIPE")
            .read(b"LINING\r\n250 AUTH PLAIN\r\n")
            .build();
        let mut reader = BufReader::new(mock);

        let reply = read_reply(&mut reader).await.unwrap();
        assert_eq!(reply.code, ReplyCode::OK);
        assert_eq!(
            reply.lines,
            vec!["relay.example.com", "PIPELINING", "AUTH PLAIN"]
        );
    }

    #[tokio::test]
    async fn test_read_leaves_next_reply_buffered() {
        let mock = Builder::new().read(b"220 ready\r\n250 ok\r\n").build();
        let mut reader = BufReader::new(mock);

        assert_eq!(read_reply(&mut reader).await.unwrap().code.as_u16(), 220);
        assert_eq!(read_reply(&mut reader).await.unwrap().code.as_u16(), 250);
    }

    #[tokio::test]
    async fn test_read_zero_bytes_is_closed() {
        let mock = Builder::new().build();
        let mut reader = BufReader::new(mock);

        let err = read_reply(&mut reader).await.unwrap_err();
        assert!(matches!(err, Error::ConnectionClosed));
    }

    #[tokio::test]
    async fn test_read_closed_mid_reply() {
        let mock = Builder::new().read(b"250-first\r\n").build();
        let mut reader = BufReader::new(mock);

        let err = read_reply(&mut reader).await.unwrap_err();
        assert!(matches!(err, Error::ConnectionClosed));
    }

    #[tokio::test]
    async fn test_read_too_many_lines() {
        let flood = "250-more\r\n".repeat(MAX_REPLY_LINES + 1);
        let mock = Builder::new().read(flood.as_bytes()).build();
        let mut reader = BufReader::new(mock);

        let err = read_reply(&mut reader).await.unwrap_err();
        assert!(matches!(err, Error::Protocol(_)));
    }

    #[tokio::test]
    async fn test_read_line_limit_allows_full_reply() {
        let mut reply = "250-more\r\n".repeat(MAX_REPLY_LINES - 1);
        reply.push_str("250 done\r\n");
        let mock = Builder::new().read(reply.as_bytes()).build();
        let mut reader = BufReader::new(mock);

        let reply = read_reply(&mut reader).await.unwrap();
        assert_eq!(reply.lines.len(), MAX_REPLY_LINES);
    }

    #[tokio::test]
    async fn test_read_io_error() {
        let mock = Builder::new()
            .read_error(io::Error::from(io::ErrorKind::ConnectionReset))
            .build();
        let mut reader = BufReader::new(mock);

        let err = read_reply(&mut reader).await.unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[tokio::test]
    async fn test_write_line_appends_crlf() {
        let mut mock = Builder::new().write(b"STARTTLS\r\n").build();
        write_line(&mut mock, "STARTTLS").await.unwrap();
    }

    #[tokio::test]
    async fn test_write_data_payload() {
        let payload = "From: a@example.com\r\nSubject: hi\r\n\r\nbody\r\n.";
        let mut mock = Builder::new()
            .write(b"From: a@example.com\r\nSubject: hi\r\n\r\nbody\r\n.\r\n")
            .build();
        write_line(&mut mock, payload).await.unwrap();
    }
}

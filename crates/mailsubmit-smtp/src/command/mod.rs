//! SMTP command lines sent by the client.
//!
//! Each command renders to a single line without the trailing CRLF; the
//! transport appends the line terminator.

use std::fmt;

/// SMTP command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// HELO - greeting with the name of the connected peer
    Helo {
        /// Hostname or address literal
        hostname: String,
    },
    /// STARTTLS - upgrade the channel to TLS
    StartTls,
    /// AUTH PLAIN - begin SASL PLAIN authentication
    AuthPlain,
    /// Base64 SASL response sent after a 334 challenge
    AuthResponse(String),
    /// MAIL FROM - start a mail transaction
    MailFrom {
        /// Sender address, empty for the null reverse-path
        from: String,
    },
    /// RCPT TO - add one recipient
    RcptTo {
        /// Recipient address
        to: String,
    },
    /// DATA - begin message content
    Data,
    /// QUIT - close the session
    Quit,
}

impl Command {
    /// Returns true if the line carries credentials and must not be logged.
    #[must_use]
    pub const fn is_sensitive(&self) -> bool {
        matches!(self, Self::AuthResponse(_))
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Helo { hostname } => write!(f, "HELO {hostname}"),
            Self::StartTls => f.write_str("STARTTLS"),
            Self::AuthPlain => f.write_str("AUTH PLAIN"),
            Self::AuthResponse(response) => f.write_str(response),
            Self::MailFrom { from } => write!(f, "MAIL FROM: <{from}>"),
            Self::RcptTo { to } => write!(f, "RCPT TO: <{to}>"),
            Self::Data => f.write_str("DATA"),
            Self::Quit => f.write_str("QUIT"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_helo_command() {
        let cmd = Command::Helo {
            hostname: "203.0.113.7".to_string(),
        };
        assert_eq!(cmd.to_string(), "HELO 203.0.113.7");
    }

    #[test]
    fn test_starttls_command() {
        assert_eq!(Command::StartTls.to_string(), "STARTTLS");
    }

    #[test]
    fn test_auth_plain() {
        assert_eq!(Command::AuthPlain.to_string(), "AUTH PLAIN");
    }

    #[test]
    fn test_auth_response_is_sensitive() {
        let cmd = Command::AuthResponse("AHVzZXIAcGFzcw==".to_string());
        assert_eq!(cmd.to_string(), "AHVzZXIAcGFzcw==");
        assert!(cmd.is_sensitive());
        assert!(!Command::Data.is_sensitive());
    }

    #[test]
    fn test_mail_from_command() {
        let cmd = Command::MailFrom {
            from: "sender@example.com".to_string(),
        };
        assert_eq!(cmd.to_string(), "MAIL FROM: <sender@example.com>");
    }

    #[test]
    fn test_mail_from_null_path() {
        let cmd = Command::MailFrom {
            from: String::new(),
        };
        assert_eq!(cmd.to_string(), "MAIL FROM: <>");
    }

    #[test]
    fn test_rcpt_to_command() {
        let cmd = Command::RcptTo {
            to: "recipient@example.com".to_string(),
        };
        assert_eq!(cmd.to_string(), "RCPT TO: <recipient@example.com>");
    }

    #[test]
    fn test_data_and_quit() {
        assert_eq!(Command::Data.to_string(), "DATA");
        assert_eq!(Command::Quit.to_string(), "QUIT");
    }
}

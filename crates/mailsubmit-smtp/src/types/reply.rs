//! Server replies and status codes.

use std::fmt;

/// A complete server reply, possibly spanning several lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Status code shared by every line of the reply.
    pub code: ReplyCode,
    /// Text of each line with the code and separator removed.
    pub lines: Vec<String>,
}

impl Reply {
    /// Creates a new reply.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Vec is not const-compatible
    pub fn new(code: ReplyCode, lines: Vec<String>) -> Self {
        Self { code, lines }
    }

    /// Returns the reply text joined with newlines.
    #[must_use]
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Checks the reply against the code a protocol step requires.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnexpectedReply`](crate::Error::UnexpectedReply)
    /// carrying the server's text when the codes differ.
    pub fn expect(self, expected: ReplyCode) -> crate::Result<Self> {
        if self.code == expected {
            Ok(self)
        } else {
            Err(crate::Error::unexpected_reply(
                expected,
                self.code,
                self.text(),
            ))
        }
    }
}

/// Three-digit SMTP status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReplyCode(u16);

impl ReplyCode {
    /// 220 greeting, also the go-ahead for STARTTLS.
    pub const SERVICE_READY: Self = Self(220);
    /// 221 closing the channel after QUIT.
    pub const CLOSING: Self = Self(221);
    /// 235 authentication succeeded.
    pub const AUTH_SUCCEEDED: Self = Self(235);
    /// 250 requested action completed.
    pub const OK: Self = Self(250);
    /// 334 server wants the SASL response.
    pub const AUTH_CONTINUE: Self = Self(334);
    /// 354 start mail input.
    pub const START_DATA: Self = Self(354);
    /// 421 service not available.
    pub const SERVICE_UNAVAILABLE: Self = Self(421);
    /// 450 mailbox busy.
    pub const MAILBOX_BUSY: Self = Self(450);
    /// 535 credentials rejected.
    pub const AUTH_FAILED: Self = Self(535);
    /// 550 mailbox unavailable.
    pub const MAILBOX_UNAVAILABLE: Self = Self(550);
    /// 554 transaction failed.
    pub const TRANSACTION_FAILED: Self = Self(554);

    /// Creates a reply code.
    #[must_use]
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Returns the numeric code.
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self.0
    }

    /// 2xx
    #[must_use]
    pub const fn is_success(self) -> bool {
        self.0 >= 200 && self.0 < 300
    }

    /// 3xx
    #[must_use]
    pub const fn is_intermediate(self) -> bool {
        self.0 >= 300 && self.0 < 400
    }

    /// 4xx
    #[must_use]
    pub const fn is_transient(self) -> bool {
        self.0 >= 400 && self.0 < 500
    }

    /// 5xx
    #[must_use]
    pub const fn is_permanent(self) -> bool {
        self.0 >= 500 && self.0 < 600
    }
}

impl fmt::Display for ReplyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

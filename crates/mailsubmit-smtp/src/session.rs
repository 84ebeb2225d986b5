//! Session engine: connect, authenticate, and close over a [`Transport`].

use tracing::{debug, info, warn};

use crate::command::Command;
use crate::connection::Transport;
use crate::error::Result;
use crate::message::Email;
use crate::sasl;
use crate::types::{Credentials, ReplyCode};

/// Lifecycle of a session.
///
/// ```text
/// Idle ─ connect() ─→ Connecting ─→ Authenticating ─→ Ready
///  ↑                      │               │              │
///  └────── failure ───────┴───────────────┘     disconnect()
///  └──────────────────────── Closing ←───────────────────┘
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionState {
    /// No connection.
    #[default]
    Idle,
    /// Opening the connection and negotiating TLS.
    Connecting,
    /// TLS is up; HELO and AUTH in progress.
    Authenticating,
    /// Authenticated; mail transactions may run.
    Ready,
    /// QUIT in progress.
    Closing,
}

/// An authenticated submission session.
///
/// `Session` owns its transport and credentials. Use [`Session::new_email`]
/// for one-shot sends, or [`Session::connect`], several
/// [`Email::send_batch`] calls, then [`Session::disconnect`] to carry many
/// messages over one connection.
///
/// ```ignore
/// use mailsubmit_smtp::{Config, Credentials, RecipientKind, Session, TcpTransport};
///
/// let transport = TcpTransport::new(Config::new("smtp.example.com"));
/// let mut session = Session::new(transport, Credentials::new("user", "secret"));
///
/// session
///     .new_email()
///     .sender("someone@example.com")
///     .to("friend@example.com")
///     .recipient("boss@example.com", "The Boss", RecipientKind::CarbonCopy)
///     .subject("Subject")
///     .body("Body")
///     .send()
///     .await?;
/// ```
#[derive(Debug)]
pub struct Session<T> {
    transport: T,
    credentials: Credentials,
    state: SessionState,
}

impl<T: Transport> Session<T> {
    /// Creates an idle session.
    #[must_use]
    pub const fn new(transport: T, credentials: Credentials) -> Self {
        Self {
            transport,
            credentials,
            state: SessionState::Idle,
        }
    }

    /// Returns the current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Returns the credentials used for AUTH PLAIN.
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns the transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Consumes the session and returns the transport.
    #[must_use]
    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Starts a new, empty message bound to this session.
    pub fn new_email(&mut self) -> Email<'_, T> {
        Email::new(self)
    }

    /// Logs raw protocol traffic through the transport.
    pub fn enable_logging(&mut self) {
        self.transport.enable_logging();
    }

    /// Connects, upgrades to TLS, and authenticates.
    ///
    /// If the transport cannot connect, its error is returned as is. A
    /// failure after that disconnects the transport before the error is
    /// returned. Either way the session is back to [`SessionState::Idle`].
    ///
    /// # Errors
    ///
    /// Returns the first failing step's error: connection, TLS, or an
    /// unexpected reply.
    pub async fn connect(&mut self) -> Result<()> {
        self.state = SessionState::Connecting;
        if let Err(err) = self.transport.connect().await {
            warn!(error = %err, "connection failed");
            self.state = SessionState::Idle;
            return Err(err);
        }

        let result = self.handshake().await;
        if let Err(err) = &result {
            warn!(error = %err, state = ?self.state, "session setup failed, disconnecting");
            self.abort();
        } else {
            self.state = SessionState::Ready;
            info!("session ready");
        }
        result
    }

    async fn handshake(&mut self) -> Result<()> {
        self.transport.read(ReplyCode::SERVICE_READY).await?;

        self.command(&Command::StartTls, ReplyCode::SERVICE_READY)
            .await?;
        self.transport.enable_tls().await?;
        self.state = SessionState::Authenticating;

        let hostname = self.transport.hostname();
        self.command(&Command::Helo { hostname }, ReplyCode::OK)
            .await?;
        self.command(&Command::AuthPlain, ReplyCode::AUTH_CONTINUE)
            .await?;

        let response = sasl::plain_response(
            self.credentials.username(),
            self.credentials.password(),
        );
        self.command(&Command::AuthResponse(response), ReplyCode::AUTH_SUCCEEDED)
            .await?;
        debug!(username = self.credentials.username(), "authenticated");
        Ok(())
    }

    /// Sends QUIT and releases the connection.
    ///
    /// The transport is disconnected whether or not QUIT succeeds.
    ///
    /// # Errors
    ///
    /// Returns the error from writing QUIT or reading its 221 reply.
    pub async fn disconnect(&mut self) -> Result<()> {
        self.state = SessionState::Closing;
        let result = self.command(&Command::Quit, ReplyCode::CLOSING).await;
        if let Err(err) = &result {
            warn!(error = %err, "QUIT failed");
        }
        self.abort();
        result
    }

    /// Drops the connection without QUIT.
    pub(crate) fn abort(&mut self) {
        self.transport.disconnect();
        self.state = SessionState::Idle;
    }

    /// Writes a command and checks the reply code.
    pub(crate) async fn command(&mut self, command: &Command, expected: ReplyCode) -> Result<()> {
        let line = command.to_string();
        if command.is_sensitive() {
            self.transport.write_sensitive_line(&line).await?;
        } else {
            self.transport.write_line(&line).await?;
        }
        self.transport.read(expected).await?;
        Ok(())
    }

    /// Writes a raw line and checks the reply code.
    pub(crate) async fn exchange(&mut self, line: &str, expected: ReplyCode) -> Result<()> {
        self.transport.write_line(line).await?;
        self.transport.read(expected).await?;
        Ok(())
    }
}

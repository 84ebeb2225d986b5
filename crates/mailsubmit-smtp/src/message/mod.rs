//! Message builder and mail transaction.

mod headers;

pub use headers::{END_OF_DATA, render};

use tracing::{debug, warn};

use crate::command::Command;
use crate::connection::Transport;
use crate::error::Result;
use crate::session::{Session, SessionState};
use crate::types::{Mailbox, Recipient, RecipientKind, ReplyCode};

/// Envelope and content of one email.
///
/// Fields are stored as given; empty values serialize as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    sender: Mailbox,
    recipients: Vec<Recipient>,
    subject: String,
    body: String,
    content_type: Option<String>,
}

impl Message {
    /// Sender used for `MAIL FROM` and the `From` header.
    #[must_use]
    pub const fn sender(&self) -> &Mailbox {
        &self.sender
    }

    /// Recipients in insertion order.
    #[must_use]
    pub fn recipients(&self) -> &[Recipient] {
        &self.recipients
    }

    /// Subject line.
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Body text.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Content type, if one was set.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Sets the sender.
    pub fn set_sender(&mut self, sender: Mailbox) {
        self.sender = sender;
    }

    /// Appends a recipient. Duplicates are kept.
    pub fn push_recipient(&mut self, recipient: Recipient) {
        self.recipients.push(recipient);
    }

    /// Sets the subject.
    pub fn set_subject(&mut self, subject: impl Into<String>) {
        self.subject = subject.into();
    }

    /// Sets the body.
    pub fn set_body(&mut self, body: impl Into<String>) {
        self.body = body.into();
    }

    /// Sets the content type. An empty value means plain text with no MIME
    /// headers.
    pub fn set_content_type(&mut self, content_type: impl Into<String>) {
        let content_type = content_type.into();
        self.content_type = (!content_type.is_empty()).then_some(content_type);
    }

    /// Renders the DATA payload.
    #[must_use]
    pub fn to_data(&self) -> String {
        render(self)
    }
}

/// Fluent builder for one email, bound to a [`Session`].
///
/// Created empty by [`Session::new_email`]. Setters only store values.
/// Sending consumes the builder, so the next `new_email()` always starts
/// from scratch while the session keeps its credentials and transport.
#[derive(Debug)]
#[must_use = "an email does nothing until sent"]
pub struct Email<'a, T> {
    session: &'a mut Session<T>,
    message: Message,
}

impl<'a, T: Transport> Email<'a, T> {
    pub(crate) fn new(session: &'a mut Session<T>) -> Self {
        Self {
            session,
            message: Message::default(),
        }
    }

    /// Returns the message built so far.
    pub const fn message(&self) -> &Message {
        &self.message
    }

    /// Sets the sender address.
    pub fn sender(mut self, address: impl Into<String>) -> Self {
        self.message.set_sender(Mailbox::new(address));
        self
    }

    /// Sets the sender address and display name.
    pub fn sender_named(mut self, address: impl Into<String>, name: impl Into<String>) -> Self {
        self.message.set_sender(Mailbox::with_name(address, name));
        self
    }

    /// Adds a recipient with a display name (may be empty) and role.
    pub fn recipient(
        mut self,
        address: impl Into<String>,
        name: impl Into<String>,
        kind: RecipientKind,
    ) -> Self {
        self.message
            .push_recipient(Recipient::new(Mailbox::with_name(address, name), kind));
        self
    }

    /// Adds a primary (`To`) recipient.
    pub fn to(self, address: impl Into<String>) -> Self {
        self.recipient(address, "", RecipientKind::Primary)
    }

    /// Adds a carbon-copy (`Cc`) recipient.
    pub fn cc(self, address: impl Into<String>) -> Self {
        self.recipient(address, "", RecipientKind::CarbonCopy)
    }

    /// Adds a blind (`Bcc`) recipient.
    pub fn bcc(self, address: impl Into<String>) -> Self {
        self.recipient(address, "", RecipientKind::Blind)
    }

    /// Sets the subject.
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.message.set_subject(subject);
        self
    }

    /// Sets the body.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.message.set_body(body);
        self
    }

    /// Sets the content type. Leave unset for plain text.
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.message.set_content_type(content_type);
        self
    }

    /// Connects, sends this message, and disconnects.
    ///
    /// Once the TCP connection is up, the transport is disconnected exactly
    /// once on every path. If the transaction fails the connection is
    /// dropped without QUIT and the transaction's error is returned.
    ///
    /// # Errors
    ///
    /// Returns the connect, transaction, or QUIT error.
    pub async fn send(self) -> Result<()> {
        let Self { session, message } = self;

        session.connect().await?;
        if let Err(err) = transaction(session, &message).await {
            warn!(error = %err, "mail transaction failed, dropping connection");
            session.abort();
            return Err(err);
        }
        session.disconnect().await
    }

    /// Sends this message over the already-authenticated session and leaves
    /// it open for further messages.
    ///
    /// # Errors
    ///
    /// Returns the first rejected step; the session is not disconnected.
    pub async fn send_batch(self) -> Result<()> {
        let Self { session, message } = self;
        if session.state() != SessionState::Ready {
            warn!(state = ?session.state(), "sending on a session that is not ready");
        }
        transaction(session, &message).await
    }
}

/// MAIL FROM, one RCPT TO per recipient, DATA, payload.
async fn transaction<T: Transport>(session: &mut Session<T>, message: &Message) -> Result<()> {
    session
        .command(
            &Command::MailFrom {
                from: message.sender().address.clone(),
            },
            ReplyCode::OK,
        )
        .await?;

    for recipient in message.recipients() {
        session
            .command(
                &Command::RcptTo {
                    to: recipient.mailbox.address.clone(),
                },
                ReplyCode::OK,
            )
            .await?;
    }

    session
        .command(&Command::Data, ReplyCode::START_DATA)
        .await?;
    session.exchange(&message.to_data(), ReplyCode::OK).await?;

    debug!(
        recipients = message.recipients().len(),
        "message accepted"
    );
    Ok(())
}

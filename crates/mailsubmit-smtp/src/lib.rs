//! # mailsubmit-smtp
//!
//! SMTP submission client for relays that require STARTTLS and AUTH PLAIN
//! (typically port 587).
//!
//! ## Quick Start
//!
//! ```ignore
//! use mailsubmit_smtp::{Config, Credentials, RecipientKind, Session, TcpTransport};
//!
//! #[tokio::main]
//! async fn main() -> mailsubmit_smtp::Result<()> {
//!     let transport = TcpTransport::new(Config::new("smtp.example.com"));
//!     let mut session = Session::new(transport, Credentials::new("user", "secret"));
//!
//!     // One message, one connection
//!     session
//!         .new_email()
//!         .sender("someone@example.com")
//!         .to("friend@example.com")
//!         .recipient("boss@example.com", "The Boss", RecipientKind::CarbonCopy)
//!         .subject("Hello")
//!         .body("Hi there.")
//!         .send()
//!         .await?;
//!
//!     // Several messages, one connection
//!     session.connect().await?;
//!     for subject in ["first", "second"] {
//!         session
//!             .new_email()
//!             .sender("someone@example.com")
//!             .to("friend@example.com")
//!             .subject(subject)
//!             .body("Batched.")
//!             .send_batch()
//!             .await?;
//!     }
//!     session.disconnect().await
//! }
//! ```
//!
//! ## Session sequence
//!
//! ```text
//! connect      greeting 220 → STARTTLS 220 → TLS → HELO 250 → AUTH PLAIN 334 → blob 235
//! send_batch   MAIL FROM 250 → RCPT TO 250 (each) → DATA 354 → payload 250
//! disconnect   QUIT 221
//! ```
//!
//! ## Modules
//!
//! - [`command`]: SMTP command lines
//! - [`connection`]: [`Transport`] contract and the TCP/TLS implementation
//! - [`message`]: message builder and DATA rendering
//! - [`parser`]: reply parser
//! - [`sasl`]: PLAIN response encoding
//! - [`types`]: replies, mailboxes, credentials

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod command;
pub mod connection;
mod error;
pub mod message;
pub mod parser;
pub mod sasl;
mod session;
pub mod types;

pub use connection::{Config, ConfigBuilder, TcpTransport, Transport};
pub use error::{Error, ErrorKind, Result};
pub use message::{Email, Message};
pub use session::{Session, SessionState};
pub use types::{Credentials, Mailbox, Recipient, RecipientKind, Reply, ReplyCode};

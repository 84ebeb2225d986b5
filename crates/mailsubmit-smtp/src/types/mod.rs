//! Core SMTP types.

mod credentials;
mod mailbox;
mod reply;

pub use credentials::Credentials;
pub use mailbox::{Mailbox, Recipient, RecipientKind};
pub use reply::{Reply, ReplyCode};

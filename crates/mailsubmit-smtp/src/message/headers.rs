//! Serialization of a message into the DATA payload.

use std::fmt::Write;

use super::Message;
use crate::types::{Recipient, RecipientKind};

/// End-of-data marker appended after the body. The transport adds the
/// final CRLF.
pub const END_OF_DATA: &str = "\r\n.";

/// Renders `message` as the DATA payload.
///
/// Layout: `From`, then one comma-joined line each for `To`, `Cc` and
/// `Bcc` (only for roles present), MIME headers when a content type is
/// set, `Subject`, a blank line, the dot-stuffed body and [`END_OF_DATA`].
#[must_use]
pub fn render(message: &Message) -> String {
    let mut data = String::new();

    let _ = write!(data, "From: {}\r\n", message.sender());
    for kind in RecipientKind::ALL {
        write_recipients(&mut data, message.recipients(), kind);
    }
    if let Some(content_type) = message.content_type() {
        data.push_str("MIME-Version: 1.0\r\n");
        let _ = write!(data, "Content-Type: {content_type}\r\n");
    }
    let _ = write!(data, "Subject: {}\r\n\r\n", message.subject());
    push_stuffed(&mut data, message.body());
    data.push_str(END_OF_DATA);

    data
}

/// Writes one header line listing every recipient of `kind`, or nothing if
/// there are none.
fn write_recipients(data: &mut String, recipients: &[Recipient], kind: RecipientKind) {
    let mut matching = recipients.iter().filter(|r| r.kind == kind);
    let Some(first) = matching.next() else {
        return;
    };

    let _ = write!(data, "{}: {}", kind.header(), first.mailbox);
    for recipient in matching {
        let _ = write!(data, ", {}", recipient.mailbox);
    }
    data.push_str("\r\n");
}

/// Appends `body`, doubling a leading `.` on every line so no body line
/// can end the DATA block early.
fn push_stuffed(data: &mut String, body: &str) {
    for (i, line) in body.split('\n').enumerate() {
        if i > 0 {
            data.push('\n');
        }
        if line.starts_with('.') {
            data.push('.');
        }
        data.push_str(line);
    }
}

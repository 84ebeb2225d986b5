//! Sender and recipient types.
//!
//! Addresses are stored as given. Nothing here validates syntax; an empty
//! address serializes as an empty string.

use std::fmt;

/// Address with an optional display name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mailbox {
    /// Envelope address.
    pub address: String,
    /// Display name (optional).
    pub name: Option<String>,
}

impl Mailbox {
    /// Creates a mailbox with just an address.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            name: None,
        }
    }

    /// Creates a mailbox with a display name.
    ///
    /// An empty name is treated as no name.
    #[must_use]
    pub fn with_name(address: impl Into<String>, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            address: address.into(),
            name: (!name.is_empty()).then_some(name),
        }
    }
}

/// Header form: `address`, or `name <address>` when a name is set.
impl fmt::Display for Mailbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{name} <{}>", self.address),
            None => f.write_str(&self.address),
        }
    }
}

/// Which header a recipient is listed under.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RecipientKind {
    /// `To`
    #[default]
    Primary,
    /// `Cc`
    CarbonCopy,
    /// `Bcc`
    Blind,
}

impl RecipientKind {
    /// Header order used when serializing a message.
    pub const ALL: [Self; 3] = [Self::Primary, Self::CarbonCopy, Self::Blind];

    /// Returns the header field name.
    #[must_use]
    pub const fn header(self) -> &'static str {
        match self {
            Self::Primary => "To",
            Self::CarbonCopy => "Cc",
            Self::Blind => "Bcc",
        }
    }
}

/// One recipient of a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipient {
    /// Address and display name.
    pub mailbox: Mailbox,
    /// Header the recipient appears under.
    pub kind: RecipientKind,
}

impl Recipient {
    /// Creates a recipient.
    #[must_use]
    pub const fn new(mailbox: Mailbox, kind: RecipientKind) -> Self {
        Self { mailbox, kind }
    }
}

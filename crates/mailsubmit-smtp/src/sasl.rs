//! SASL PLAIN response encoding (RFC 4616).

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Generates the PLAIN response for `username`/`password`.
///
/// The authorization identity is left empty, so the encoded blob is
/// `\0<username>\0<password>` in standard padded base64.
///
/// ```
/// use mailsubmit_smtp::sasl::plain_response;
///
/// assert_eq!(plain_response("username", "password"), "AHVzZXJuYW1lAHBhc3N3b3Jk");
/// ```
#[must_use]
pub fn plain_response(username: &str, password: &str) -> String {
    let auth_string = format!("\0{username}\0{password}");
    STANDARD.encode(auth_string.as_bytes())
}

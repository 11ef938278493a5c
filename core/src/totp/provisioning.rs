//! TOTP provisioning URIs for authenticator enrollment

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::constants::OTPAUTH_SCHEME;

/// Characters a browser's `encodeURI` escapes on top of controls and non-ASCII.
/// URI-reserved characters (`;/?:@&=+$,#`) pass through untouched.
const ENCODE_URI_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Enrollment data for one authenticator account
///
/// Built fresh for every render; nothing is cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisioningUri {
    /// Page domain, used both as label prefix and issuer
    pub domain: String,
    /// Account name shown in the authenticator (the user's email)
    pub account: String,
    /// Shared secret, taken verbatim
    pub secret: String,
}

impl ProvisioningUri {
    pub fn new(
        domain: impl Into<String>,
        account: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        Self {
            domain: domain.into(),
            account: account.into(),
            secret: secret.into(),
        }
    }

    /// Raw `otpauth://totp/<domain>:<account>?secret=<secret>&issuer=<domain>`
    pub fn to_uri(&self) -> String {
        format!(
            "{}{}:{}?secret={}&issuer={}",
            OTPAUTH_SCHEME, self.domain, self.account, self.secret, self.domain
        )
    }

    /// The URI percent-encoded for embedding into a QR code
    pub fn to_encoded(&self) -> String {
        encode_uri(&self.to_uri())
    }
}

/// Percent-encode a whole URI, keeping its structure intact
pub fn encode_uri(uri: &str) -> String {
    utf8_percent_encode(uri, ENCODE_URI_SET).to_string()
}

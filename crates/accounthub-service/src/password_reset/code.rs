//! The combined email-and-token code carried by reset links.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use accounthub_core::error::AppError;
use accounthub_core::result::AppResult;

/// An email address and its reset token, packed into one URL-safe string.
///
/// Wire form: unpadded URL-safe base64 of `email:token`. The token is
/// hex, so splitting on the last `:` is unambiguous.
#[derive(Clone, PartialEq, Eq)]
pub struct ResetCode {
    /// Address the reset was issued for.
    pub email: String,
    /// Opaque reset token.
    pub token: String,
}

impl std::fmt::Debug for ResetCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResetCode")
            .field("email", &self.email)
            .field("token", &"<redacted>")
            .finish()
    }
}

impl ResetCode {
    /// Pair an email with a token.
    pub fn new(email: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            token: token.into(),
        }
    }

    /// Encode for use in a link.
    pub fn encode(&self) -> String {
        URL_SAFE_NO_PAD.encode(format!("{}:{}", self.email, self.token))
    }

    /// Decode a code from a link. Any malformed input is `InvalidCode`.
    pub fn decode(code: &str) -> AppResult<Self> {
        let invalid = || AppError::invalid_code("Reset code is invalid");

        let bytes = URL_SAFE_NO_PAD
            .decode(code.trim())
            .map_err(|_| invalid())?;
        let raw = String::from_utf8(bytes).map_err(|_| invalid())?;
        let (email, token) = raw.rsplit_once(':').ok_or_else(invalid)?;

        if email.is_empty() || token.is_empty() {
            return Err(invalid());
        }

        Ok(Self::new(email, token))
    }
}

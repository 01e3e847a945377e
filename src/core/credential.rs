//! Caller-supplied API credential.
//!
//! The key is passed explicitly into every core operation. It is never read
//! from the environment here, never printed by `Debug`, and wiped from
//! memory when dropped.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::core::tts::{TTSError, TTSResult};

/// Opaque Gemini API key.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Credential(String);

impl Credential {
    /// Wrap an API key, rejecting empty or whitespace-only values.
    pub fn new(api_key: impl Into<String>) -> TTSResult<Self> {
        let mut key: String = api_key.into();
        let trimmed = key.trim();
        if trimmed.is_empty() {
            key.zeroize();
            return Err(TTSError::Auth("API key is required".to_string()));
        }
        let credential = Self(trimmed.to_string());
        key.zeroize();
        Ok(credential)
    }

    /// Pick the first non-blank key among the candidates.
    ///
    /// Used by the shells to apply "explicit argument, then configuration"
    /// precedence without the core touching ambient state.
    pub fn resolve<'a, I>(candidates: I) -> TTSResult<Self>
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        candidates
            .into_iter()
            .flatten()
            .find(|key| !key.trim().is_empty())
            .map(Self::new)
            .unwrap_or_else(|| Err(TTSError::Auth("API key is required".to_string())))
    }

    /// Raw key for the request header.
    pub(crate) fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

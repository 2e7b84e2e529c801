//! Short token generation

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use crate::errors::{Result, UrlShortError};

pub const DEFAULT_TOKEN_LENGTH: usize = 8;

/// Source of candidate tokens
///
/// Implementations only produce candidates; uniqueness is checked against
/// the store by the caller.
pub trait TokenGenerator: Send + Sync {
    fn generate(&self) -> Result<String>;
}

/// Random tokens drawn from the OS entropy source
///
/// Output uses the URL-safe base64 alphabet (`A-Z a-z 0-9 - _`). An
/// unavailable entropy source is reported as `RandomSource`; there is no
/// fallback to a weaker generator.
#[derive(Debug, Clone, Copy)]
pub struct RandomTokenGenerator {
    length: usize,
}

impl RandomTokenGenerator {
    pub fn new(length: usize) -> Self {
        Self {
            length: length.max(1),
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

impl Default for RandomTokenGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_TOKEN_LENGTH)
    }
}

impl TokenGenerator for RandomTokenGenerator {
    fn generate(&self) -> Result<String> {
        // base64 yields 4 chars per 3 bytes, so `length` bytes always
        // encode to at least `length` characters.
        let mut bytes = vec![0u8; self.length];
        getrandom::fill(&mut bytes).map_err(|e| {
            UrlShortError::random_source(format!("OS entropy source unavailable: {}", e))
        })?;

        let mut token = URL_SAFE_NO_PAD.encode(&bytes);
        token.truncate(self.length);
        Ok(token)
    }
}

//! Short codes derived from issue numbers.
//!
//! The encoding is Hashids with the stock alphabet and separators,
//! restricted to a single number and no minimum length. With an empty salt
//! it reproduces the codes earlier releases of the action published, so
//! existing redirect pages keep their paths.

use harsh::Harsh;
use thiserror::Error;

/// The salt could not be turned into a codec.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid slug salt: {message}")]
pub struct SlugSaltError {
    /// Builder message.
    pub message: String,
}

/// Deterministic, reversible encoder from issue numbers to short codes.
///
/// # Example
///
/// ```
/// use shorty::shortener::SlugCodec;
///
/// let codec = SlugCodec::default();
/// assert_eq!(codec.encode(42), "9x");
/// assert_eq!(codec.decode("9x"), Some(42));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SlugCodec {
    hasher: Harsh,
}

impl SlugCodec {
    /// Builds a codec for the given salt. An empty salt yields the stock
    /// Hashids output.
    ///
    /// # Errors
    ///
    /// Returns [`SlugSaltError`] when the hasher rejects the salt.
    pub fn new(salt: &str) -> Result<Self, SlugSaltError> {
        let hasher = Harsh::builder()
            .salt(salt)
            .build()
            .map_err(|error| SlugSaltError {
                message: error.to_string(),
            })?;
        Ok(Self { hasher })
    }

    /// Encodes `number`.
    #[must_use]
    pub fn encode(&self, number: u64) -> String {
        self.hasher.encode(&[number])
    }

    /// Recovers the number behind a code produced by [`Self::encode`].
    ///
    /// Returns `None` for any string `encode` would not have produced.
    #[must_use]
    pub fn decode(&self, slug: &str) -> Option<u64> {
        match self.hasher.decode(slug).ok()?.as_slice() {
            [number] if self.encode(*number) == slug => Some(*number),
            _ => None,
        }
    }
}

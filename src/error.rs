//! use csrkit::error::CsrKitError;

use std::path::PathBuf;

use thiserror::Error;

use crate::request::subject::AttributeKind;

/// Crate-wide result type.
pub type Result<T> = std::result::Result<T, CsrKitError>;

/// Represents errors that can occur in the CsrKit library.
///
/// This enum provides detailed error messages for various failure scenarios.
#[derive(Debug, Error)]
pub enum CsrKitError {
    /// The RSA primitive could not produce a key pair.
    #[error("Key generation error: {0}")]
    KeyGenerationError(String),

    /// A subject attribute value cannot be represented in its ASN.1 string type.
    #[error("Failed to encode {attribute} attribute: {reason}")]
    EncodingError {
        attribute: AttributeKind,
        reason: String,
    },

    /// Error during DER or PEM serialization of a structure.
    #[error("Failed to serialize data: {0}")]
    SerializationError(String),

    /// Error during data decoding.
    #[error("Failed to decode data: {0}")]
    DecodingError(String),

    /// Signing failed, or a signature did not verify.
    #[error("Signature error: {0}")]
    SignatureError(String),

    /// A file could not be opened or written.
    #[error("Failed to write {}: {source}", path.display())]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<der::Error> for CsrKitError {
    /// Converts a `der::Error` into a `CsrKitError`.
    fn from(err: der::Error) -> Self {
        CsrKitError::DecodingError(err.to_string())
    }
}

impl From<rsa::Error> for CsrKitError {
    fn from(err: rsa::Error) -> Self {
        CsrKitError::KeyGenerationError(err.to_string())
    }
}

impl From<pkcs8::Error> for CsrKitError {
    fn from(err: pkcs8::Error) -> Self {
        CsrKitError::DecodingError(err.to_string())
    }
}

impl From<pkcs8::spki::Error> for CsrKitError {
    fn from(err: pkcs8::spki::Error) -> Self {
        CsrKitError::DecodingError(err.to_string())
    }
}

impl From<pem::PemError> for CsrKitError {
    fn from(err: pem::PemError) -> Self {
        CsrKitError::DecodingError(err.to_string())
    }
}

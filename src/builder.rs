use std::fmt;

use zeroize::Zeroizing;

use crate::error::Result;
use crate::key::{KeyPair, RSA_KEY_BITS};
use crate::request::CertificateRequest;
use crate::request::subject::SubjectAttributes;

/// Builds certificate signing requests for a fixed subject.
///
/// Holds no key material. Every call to [`RequestBuilder::generate`] creates
/// a fresh key pair, so the builder can be shared across threads and reused.
#[derive(Clone)]
pub struct RequestBuilder {
    subject: SubjectAttributes,
    passphrase: Option<Zeroizing<String>>,
}

impl fmt::Debug for RequestBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestBuilder")
            .field("subject", &self.subject)
            .field("encrypted", &self.passphrase.is_some())
            .finish()
    }
}

/// The two independent artifacts of one `generate` call.
///
/// `request` is safe to transmit. `private_key` must stay local and is
/// wiped from memory when dropped.
pub struct GeneratedRequest {
    pub request: Vec<u8>,
    pub private_key: Zeroizing<Vec<u8>>,
}

impl GeneratedRequest {
    /// Splits into `(request_bytes, private_key_bytes)`.
    pub fn into_parts(self) -> (Vec<u8>, Zeroizing<Vec<u8>>) {
        (self.request, self.private_key)
    }
}

impl fmt::Debug for GeneratedRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratedRequest")
            .field("request", &String::from_utf8_lossy(&self.request))
            .field("private_key", &"<redacted>")
            .finish()
    }
}

impl RequestBuilder {
    /// Creates a builder for `subject`. The private key is emitted unencrypted.
    pub fn new(subject: SubjectAttributes) -> Self {
        Self {
            subject,
            passphrase: None,
        }
    }

    /// Encrypts the emitted private key with `passphrase` (PKCS#8 PBES2).
    pub fn with_passphrase(mut self, passphrase: impl Into<String>) -> Self {
        self.passphrase = Some(Zeroizing::new(passphrase.into()));
        self
    }

    pub fn subject(&self) -> &SubjectAttributes {
        &self.subject
    }

    /// Generates a 2048-bit RSA key and a PKCS#10 request signed with it.
    ///
    /// Returns the request as a `CERTIFICATE REQUEST` PEM and the private key
    /// as a `PRIVATE KEY` PEM (or `ENCRYPTED PRIVATE KEY` when a passphrase is
    /// set).
    ///
    /// # Errors
    /// * [`CsrKitError::EncodingError`] if a subject value does not fit its
    ///   string type. Checked before any key is generated.
    /// * [`CsrKitError::KeyGenerationError`] if the RSA primitive fails.
    pub fn generate(&self) -> Result<GeneratedRequest> {
        let subject = self.subject.as_x509_name()?;

        tracing::debug!(subject = %self.subject, "generating request key");
        let key = KeyPair::generate_rsa(RSA_KEY_BITS)?;

        let request = CertificateRequest::new_self_signed(subject, &key)?;
        let request_pem = request.to_pem()?;

        let key_pem = match &self.passphrase {
            Some(passphrase) => key.to_pkcs8_encrypted_pem(passphrase.as_bytes())?,
            None => key.to_pkcs8_pem()?,
        };

        Ok(GeneratedRequest {
            request: request_pem.into_bytes(),
            private_key: Zeroizing::new(key_pem.as_bytes().to_vec()),
        })
    }
}

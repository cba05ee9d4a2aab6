pub mod info;
pub mod subject;

use der::asn1::{AnyRef, BitString};
use der::{Decode, Encode};
use pkcs8::DecodePublicKey;
use rsa::RsaPublicKey;
use rsa::pkcs1v15::{Signature, VerifyingKey};
use rsa::signature::Verifier;
use sha2::Sha256;
use x509_cert::name::Name;
use x509_cert::request::CertReq;
use x509_cert::spki::AlgorithmIdentifierOwned;

use crate::error::{CsrKitError, Result};
use crate::key::KeyPair;
use crate::pem_utils::{der_to_pem, pem_to_der};
use info::RequestInfo;
use subject::SubjectAttributes;

/// PEM label of a PKCS#10 request.
pub const PEM_LABEL: &str = "CERTIFICATE REQUEST";

/// Represents the supported request signature algorithms.
///
/// This enum provides a mapping to the corresponding OIDs for each algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureAlgorithm {
    /// SHA-256 with RSA encryption (PKCS#1 v1.5).
    Sha256WithRSA,
}

impl From<SignatureAlgorithm> for AlgorithmIdentifierOwned {
    /// Converts a `SignatureAlgorithm` into an `AlgorithmIdentifierOwned`.
    ///
    /// RSA algorithm identifiers carry an explicit NULL parameter.
    fn from(value: SignatureAlgorithm) -> Self {
        match value {
            SignatureAlgorithm::Sha256WithRSA => AlgorithmIdentifierOwned {
                oid: const_oid::db::rfc5912::SHA_256_WITH_RSA_ENCRYPTION,
                parameters: Some(AnyRef::NULL.into()),
            },
        }
    }
}

impl TryFrom<&AlgorithmIdentifierOwned> for SignatureAlgorithm {
    type Error = CsrKitError;

    fn try_from(value: &AlgorithmIdentifierOwned) -> Result<Self> {
        match value.oid {
            const_oid::db::rfc5912::SHA_256_WITH_RSA_ENCRYPTION => Ok(Self::Sha256WithRSA),
            other => Err(CsrKitError::DecodingError(format!(
                "Unsupported signature algorithm {other}"
            ))),
        }
    }
}

/// A signed PKCS#10 certification request.
///
/// This struct provides methods to encode the request into DER or PEM
/// formats and to inspect and verify a decoded request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateRequest {
    /// The inner representation of the request.
    pub inner: CertReq,
}

impl CertificateRequest {
    /// Signs a request body binding `subject` to the public half of `key`.
    ///
    /// # Arguments
    /// * `subject` - The encoded subject name.
    /// * `key` - The key pair whose public half is embedded and whose private
    ///   half produces the signature.
    pub fn new_self_signed(subject: Name, key: &KeyPair) -> Result<Self> {
        let info = RequestInfo {
            subject,
            subject_public_key: key.as_spki()?,
        };

        let signature = key.sign_data(&info.to_der()?)?;
        tracing::debug!(signature_len = signature.len(), "signed request body");

        let signature = BitString::from_bytes(&signature)
            .map_err(|e| CsrKitError::SerializationError(e.to_string()))?;

        Ok(Self {
            inner: CertReq {
                info: info.to_cert_req_info(),
                algorithm: SignatureAlgorithm::Sha256WithRSA.into(),
                signature,
            },
        })
    }

    /// Encodes the request into DER format.
    pub fn to_der(&self) -> Result<Vec<u8>> {
        self.inner
            .to_der()
            .map_err(|e| CsrKitError::SerializationError(e.to_string()))
    }

    /// Encodes the request into a `CERTIFICATE REQUEST` PEM container.
    pub fn to_pem(&self) -> Result<String> {
        Ok(der_to_pem(&self.to_der()?, PEM_LABEL))
    }

    /// Decodes a DER-encoded request.
    pub fn from_der(der: &[u8]) -> Result<Self> {
        Ok(Self {
            inner: CertReq::from_der(der)?,
        })
    }

    /// Decodes a `CERTIFICATE REQUEST` PEM container.
    pub fn from_pem(pem: &str) -> Result<Self> {
        Self::from_der(&pem_to_der(pem, PEM_LABEL)?)
    }

    /// Returns the signature algorithm named by the request.
    pub fn signature_algorithm(&self) -> Result<SignatureAlgorithm> {
        SignatureAlgorithm::try_from(&self.inner.algorithm)
    }

    /// Extracts the subject attributes from the request body.
    pub fn subject(&self) -> Result<SubjectAttributes> {
        SubjectAttributes::from_x509_name(&self.inner.info.subject)
    }

    /// Extracts the RSA public key embedded in the request body.
    pub fn public_key(&self) -> Result<RsaPublicKey> {
        let spki = self
            .inner
            .info
            .public_key
            .to_der()
            .map_err(|e| CsrKitError::SerializationError(e.to_string()))?;
        Ok(RsaPublicKey::from_public_key_der(&spki)?)
    }

    /// Checks the request signature against the public key in its own body.
    ///
    /// This is a proof of possession of the private key, not a trust decision.
    pub fn verify(&self) -> Result<()> {
        match self.signature_algorithm()? {
            SignatureAlgorithm::Sha256WithRSA => {}
        }

        let verifying_key: VerifyingKey<Sha256> = VerifyingKey::new(self.public_key()?);
        let message = self
            .inner
            .info
            .to_der()
            .map_err(|e| CsrKitError::SerializationError(e.to_string()))?;
        let signature_bytes = self.inner.signature.as_bytes().ok_or_else(|| {
            CsrKitError::SignatureError("signature has unused bits".to_string())
        })?;
        let signature = Signature::try_from(signature_bytes)
            .map_err(|e| CsrKitError::SignatureError(e.to_string()))?;

        verifying_key
            .verify(&message, &signature)
            .map_err(|e| CsrKitError::SignatureError(e.to_string()))
    }
}

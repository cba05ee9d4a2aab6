use der::Encode;
use x509_cert::attr::Attributes;
use x509_cert::name::Name;
use x509_cert::request::{CertReqInfo, Version};
use x509_cert::spki::SubjectPublicKeyInfoOwned;

use crate::error::{CsrKitError, Result};

/// The unsigned body of a certification request.
///
/// # Fields
/// * `subject` - The distinguished name the requester claims.
/// * `subject_public_key` - The public key bound to that name.
///
/// No request attributes (extension requests, challenge passwords) are
/// emitted; the attribute set is always present and empty.
#[derive(Clone, Debug)]
pub struct RequestInfo {
    pub subject: Name,
    pub subject_public_key: SubjectPublicKeyInfoOwned,
}

impl RequestInfo {
    /// Converts the body into a `CertReqInfo` for DER encoding.
    pub fn to_cert_req_info(&self) -> CertReqInfo {
        CertReqInfo {
            version: Version::V1,
            subject: self.subject.clone(),
            public_key: self.subject_public_key.clone(),
            attributes: Attributes::new(),
        }
    }

    /// Encodes the body into the DER bytes that get signed.
    pub fn to_der(&self) -> Result<Vec<u8>> {
        self.to_cert_req_info()
            .to_der()
            .map_err(|e| CsrKitError::SerializationError(e.to_string()))
    }
}

//! # CsrKit - A Pure Rust Certificate Signing Request Generator
//!
//! CsrKit builds PKCS#10 certificate signing requests entirely with rustcrypto
//! libraries. Each request gets a freshly generated RSA key; the request and
//! the private key are handed back as PEM containers ready to be written to
//! disk or sent to a certificate authority.
//!
//! ## What a generated request contains
//!
//! - **Key**: RSA, 2048-bit modulus, public exponent 65537
//! - **Subject**: C, ST, L, O, OU, CN and emailAddress, always in that order
//! - **Signature**: sha256WithRSAEncryption (PKCS#1 v1.5) over the request body
//! - **Outputs**: `CERTIFICATE REQUEST` PEM and PKCS#8 `PRIVATE KEY` PEM,
//!   optionally `ENCRYPTED PRIVATE KEY` when a passphrase is configured
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use csrkit::{builder::RequestBuilder, persist, request::subject::SubjectAttributes};
//!
//! # fn main() -> Result<(), csrkit::error::CsrKitError> {
//! let subject = SubjectAttributes::builder()
//!     .country("US")
//!     .state("California")
//!     .locality("San Francisco")
//!     .organization("Example Corp")
//!     .organizational_unit("IT")
//!     .common_name("example.com")
//!     .email("admin@example.com")
//!     .build();
//!
//! let (request, private_key) = RequestBuilder::new(subject).generate()?.into_parts();
//!
//! persist::write("example.csr", &request)?;
//! persist::write_private("private_key.pem", &private_key)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Inspecting a Request
//!
//! ```rust,no_run
//! use csrkit::request::CertificateRequest;
//!
//! # fn main() -> Result<(), csrkit::error::CsrKitError> {
//! let pem = std::fs::read_to_string("example.csr").unwrap();
//! let request = CertificateRequest::from_pem(&pem)?;
//! request.verify()?;
//! println!("CN={}", request.subject()?.common_name);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! ```rust
//! use csrkit::{builder::RequestBuilder, error::CsrKitError, request::subject::SubjectAttributes};
//!
//! let subject = SubjectAttributes::builder()
//!     .country("US")
//!     .state("California")
//!     .locality("San Francisco")
//!     .organization("Example Corp")
//!     .organizational_unit("IT")
//!     .common_name("bad\0name")
//!     .email("admin@example.com")
//!     .build();
//!
//! match RequestBuilder::new(subject).generate() {
//!     Err(CsrKitError::EncodingError { attribute, reason }) => {
//!         println!("{attribute} rejected: {reason}")
//!     }
//!     Err(e) => println!("Other error: {}", e),
//!     Ok(_) => unreachable!(),
//! }
//! ```
//!
//! ## Concurrency
//!
//! Generation is CPU-bound and blocking. [`builder::RequestBuilder`] is
//! `Send + Sync`; async hosts should call it from a blocking worker.
//!
//! ## Module Organization
//!
//! - [`builder`]: One-call request and key generation
//! - [`request`]: PKCS#10 structure, subject attributes, encoding and verification
//! - [`key`]: RSA key generation, signing and PKCS#8 export/import
//! - [`persist`]: Writing containers to files
//! - [`pem_utils`]: PEM framing helpers
//! - [`error`]: Error types

pub mod builder;
pub mod error;
pub mod key;
pub mod pem_utils;
pub mod persist;
pub mod request;

use std::fmt;

use pkcs8::der::pem::PemLabel;
use pkcs8::pkcs5::pbes2;
use pkcs8::{
    DecodePrivateKey, EncodePrivateKey, EncryptedPrivateKeyInfo, LineEnding, PrivateKeyInfo,
};
use rand_core::{OsRng, RngCore};
use rsa::pkcs1v15::SigningKey as RsaSigningKey;
use rsa::signature::{RandomizedSigner, SignatureEncoding};
use rsa::traits::PublicKeyParts;
use rsa::{BigUint, RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;
use x509_cert::spki::SubjectPublicKeyInfoOwned;
use zeroize::Zeroizing;

use crate::error::{CsrKitError, Result};

/// Modulus size used for every generated request key.
pub const RSA_KEY_BITS: usize = 2048;

/// Public exponent F4.
pub const RSA_PUBLIC_EXPONENT: u32 = 65_537;

/// PBKDF2 rounds for passphrase-encrypted keys.
pub const PBKDF2_ITERATIONS: u32 = 100_000;

const PBKDF2_SALT_LEN: usize = 16;

/// An RSA key pair owned by the caller that generated it.
///
/// The private half is boxed so moving a `KeyPair` around stays cheap.
#[derive(Clone)]
pub struct KeyPair {
    private: Box<RsaPrivateKey>,
    public: RsaPublicKey,
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("bits", &(self.public.size() * 8))
            .field("e", &self.public.e())
            .finish_non_exhaustive()
    }
}

impl KeyPair {
    /// Generate an RSA key pair with the given modulus size and exponent 65537.
    ///
    /// # Errors
    /// Returns [`CsrKitError::KeyGenerationError`] when the entropy source or
    /// the prime search fails. No retry is attempted.
    pub fn generate_rsa(bits: usize) -> Result<Self> {
        let mut rng = OsRng;
        let exponent = BigUint::from(RSA_PUBLIC_EXPONENT);
        let private = RsaPrivateKey::new_with_exp(&mut rng, bits, &exponent)
            .map_err(|e| CsrKitError::KeyGenerationError(e.to_string()))?;
        let public = RsaPublicKey::from(&private);
        tracing::debug!(bits, "generated RSA key pair");
        Ok(KeyPair {
            private: Box::new(private),
            public,
        })
    }

    /// Returns the public half of the key pair.
    pub fn public_key(&self) -> &RsaPublicKey {
        &self.public
    }

    /// Builds the `SubjectPublicKeyInfo` embedded in a request body.
    pub fn as_spki(&self) -> Result<SubjectPublicKeyInfoOwned> {
        SubjectPublicKeyInfoOwned::from_key(self.public.clone())
            .map_err(|e| CsrKitError::SerializationError(e.to_string()))
    }

    /// Signs `data` with RSASSA-PKCS1-v1_5 over SHA-256.
    pub fn sign_data(&self, data: &[u8]) -> Result<Vec<u8>> {
        let signing_key: RsaSigningKey<Sha256> = RsaSigningKey::new(*(self.private.clone()));
        let signature = signing_key
            .try_sign_with_rng(&mut OsRng, data)
            .map_err(|e| CsrKitError::SignatureError(e.to_string()))?;
        Ok(signature.to_vec())
    }

    /// Exports the private key as an unencrypted PKCS#8 `PRIVATE KEY` PEM.
    pub fn to_pkcs8_pem(&self) -> Result<Zeroizing<String>> {
        self.private
            .to_pkcs8_pem(LineEnding::LF)
            .map_err(|e| CsrKitError::SerializationError(e.to_string()))
    }

    /// Exports the private key as a PKCS#8 `ENCRYPTED PRIVATE KEY` PEM
    /// protected with the given passphrase.
    ///
    /// Uses PBES2 with PBKDF2-HMAC-SHA256 and AES-256-CBC; OpenSSL rejects the
    /// scrypt parameters `pkcs8` would pick by default.
    pub fn to_pkcs8_encrypted_pem(&self, passphrase: &[u8]) -> Result<Zeroizing<String>> {
        let mut salt = [0u8; PBKDF2_SALT_LEN];
        let mut iv = [0u8; 16];
        OsRng.fill_bytes(&mut salt);
        OsRng.fill_bytes(&mut iv);
        let params = pbes2::Parameters::pbkdf2_sha256_aes256cbc(PBKDF2_ITERATIONS, &salt, &iv)
            .map_err(serialization_error)?;

        let document = self
            .private
            .to_pkcs8_der()
            .map_err(serialization_error)?;
        let info = PrivateKeyInfo::try_from(document.as_bytes())?;
        let encrypted = info
            .encrypt_with_params(params, passphrase)
            .map_err(serialization_error)?;

        encrypted
            .to_pem(EncryptedPrivateKeyInfo::PEM_LABEL, LineEnding::LF)
            .map_err(serialization_error)
    }

    /// Imports a key pair from an unencrypted PKCS#8 PEM.
    pub fn from_pkcs8_pem(pem: &str) -> Result<Self> {
        let private = RsaPrivateKey::from_pkcs8_pem(pem)?;
        Ok(Self::from_private(private))
    }

    /// Imports a key pair from an encrypted PKCS#8 PEM.
    pub fn from_pkcs8_encrypted_pem(pem: &str, passphrase: &[u8]) -> Result<Self> {
        let private = RsaPrivateKey::from_pkcs8_encrypted_pem(pem, passphrase)?;
        Ok(Self::from_private(private))
    }

    fn from_private(private: RsaPrivateKey) -> Self {
        let public = RsaPublicKey::from(&private);
        KeyPair {
            private: Box::new(private),
            public,
        }
    }
}

fn serialization_error(err: impl fmt::Display) -> CsrKitError {
    CsrKitError::SerializationError(err.to_string())
}

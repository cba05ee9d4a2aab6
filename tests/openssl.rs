mod util;

use std::fs;
use std::process::Command;

use openssl::nid::Nid;
use openssl::pkey::PKey;
use openssl::x509::X509Req;
use regex::Regex;
use tempfile::TempDir;

#[test]
fn test_openssl_crate_validate_csr() {
    let (request, private_key) = util::example_builder().generate().unwrap().into_parts();

    let req = X509Req::from_pem(&request).expect("Failed to parse CSR PEM");
    let key = PKey::private_key_from_pem(&private_key).expect("Failed to parse PKCS#8 PEM");

    // Self-signature and key binding
    let embedded = req.public_key().unwrap();
    assert!(req.verify(&embedded).unwrap(), "CSR signature did not verify");
    assert!(embedded.public_eq(&key), "CSR key does not match private key");

    let rsa = key.rsa().unwrap();
    assert_eq!(rsa.size() * 8, 2048);
    assert_eq!(rsa.e().to_dec_str().unwrap().to_string(), "65537");

    // Subject entries in order
    let entries: Vec<(i32, String)> = req
        .subject_name()
        .entries()
        .map(|entry| {
            (
                entry.object().nid().as_raw(),
                entry.data().as_utf8().unwrap().to_string(),
            )
        })
        .collect();
    assert_eq!(
        entries,
        vec![
            (Nid::COUNTRYNAME.as_raw(), "US".to_string()),
            (Nid::STATEORPROVINCENAME.as_raw(), "California".to_string()),
            (Nid::LOCALITYNAME.as_raw(), "San Francisco".to_string()),
            (Nid::ORGANIZATIONNAME.as_raw(), "Example Corp".to_string()),
            (Nid::ORGANIZATIONALUNITNAME.as_raw(), "IT".to_string()),
            (Nid::COMMONNAME.as_raw(), "example.com".to_string()),
            (Nid::PKCS9_EMAILADDRESS.as_raw(), "admin@example.com".to_string()),
        ]
    );

    // Version 1 request is encoded as 0
    assert_eq!(req.version(), 0);
}

#[test]
fn test_openssl_crate_reads_encrypted_key() {
    let (request, private_key) = util::example_builder()
        .with_passphrase("hunter2")
        .generate()
        .unwrap()
        .into_parts();

    let key = PKey::private_key_from_pem_passphrase(&private_key, b"hunter2")
        .expect("Failed to decrypt PKCS#8 PEM");
    assert_eq!(key.bits(), 2048);

    let req = X509Req::from_pem(&request).unwrap();
    assert!(req.public_key().unwrap().public_eq(&key));

    assert!(PKey::private_key_from_pem_passphrase(&private_key, b"wrong").is_err());
}

#[test]
#[ignore]
fn test_openssl_cli_validate_csr() {
    let (request, _) = util::example_builder().generate().unwrap().into_parts();

    let dir = TempDir::new().unwrap();
    let csr_path = dir.path().join("example.csr");
    fs::write(&csr_path, &request).expect("Failed to write CSR");

    // Use OpenSSL CLI to parse and self-verify the request
    let output = Command::new("openssl")
        .arg("req")
        .arg("-in")
        .arg(&csr_path)
        .arg("-noout")
        .arg("-text")
        .arg("-verify")
        .output()
        .expect("Failed to execute OpenSSL command");

    assert!(
        output.status.success(),
        "OpenSSL command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let output_text = format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );

    assert!(
        Regex::new(r"verify OK").unwrap().is_match(&output_text),
        "Self-signature not verified"
    );
    assert!(
        Regex::new(r"Subject: C ?= ?US, ST ?= ?California, L ?= ?San Francisco, O ?= ?Example Corp, OU ?= ?IT, CN ?= ?example\.com, emailAddress ?= ?admin@example\.com")
            .unwrap()
            .is_match(&output_text),
        "Subject field is incorrect"
    );
    assert!(
        Regex::new(r"Public-Key: \(2048 bit\)").unwrap().is_match(&output_text),
        "Key size is incorrect"
    );
    assert!(
        output_text.contains("Exponent: 65537 (0x10001)"),
        "Public exponent is incorrect"
    );
    assert!(
        output_text.contains("Signature Algorithm: sha256WithRSAEncryption"),
        "Signature Algorithm field is incorrect"
    );
}

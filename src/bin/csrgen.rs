//! csrgen - generate a certificate signing request and its private key.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use csrkit::builder::RequestBuilder;
use csrkit::persist;
use csrkit::request::subject::SubjectAttributes;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "csrgen")]
#[command(about = "Generate an RSA key and a PKCS#10 certificate signing request")]
#[command(version)]
struct Cli {
    /// Country name (C), two-letter code
    #[arg(long, env = "CSRGEN_COUNTRY")]
    country: String,

    /// State or province name (ST)
    #[arg(long, env = "CSRGEN_STATE")]
    state: String,

    /// Locality name (L)
    #[arg(long, env = "CSRGEN_LOCALITY")]
    locality: String,

    /// Organization name (O)
    #[arg(long, env = "CSRGEN_ORGANIZATION")]
    organization: String,

    /// Organizational unit name (OU)
    #[arg(long, env = "CSRGEN_ORGANIZATIONAL_UNIT")]
    organizational_unit: String,

    /// Common name (CN), usually the domain name
    #[arg(long, env = "CSRGEN_COMMON_NAME")]
    common_name: String,

    /// Email address
    #[arg(long, env = "CSRGEN_EMAIL")]
    email: String,

    /// Where to write the request
    #[arg(long, default_value = "request.csr", env = "CSRGEN_CSR_OUT")]
    csr_out: PathBuf,

    /// Where to write the private key (created with owner-only permissions)
    #[arg(long, default_value = "private_key.pem", env = "CSRGEN_KEY_OUT")]
    key_out: PathBuf,

    /// Encrypt the private key with this passphrase
    #[arg(long, env = "CSRGEN_PASSPHRASE", hide_env_values = true)]
    passphrase: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    run(Cli::parse())
}

fn run(cli: Cli) -> Result<()> {
    let subject = SubjectAttributes::builder()
        .country(cli.country)
        .state(cli.state)
        .locality(cli.locality)
        .organization(cli.organization)
        .organizational_unit(cli.organizational_unit)
        .common_name(cli.common_name)
        .email(cli.email)
        .build();

    let mut builder = RequestBuilder::new(subject);
    if let Some(passphrase) = cli.passphrase {
        builder = builder.with_passphrase(passphrase);
    }

    tracing::info!("Generating 2048-bit RSA key and request for {}", builder.subject());
    let (request, private_key) = builder
        .generate()
        .context("Failed to generate certificate signing request")?
        .into_parts();

    persist::write(&cli.csr_out, &request).context("Failed to write request")?;
    tracing::info!("CSR written to {}", cli.csr_out.display());

    persist::write_private(&cli.key_out, &private_key).context("Failed to write private key")?;
    tracing::info!("Private key written to {}", cli.key_out.display());

    Ok(())
}

use super::{SecurityConfig, TlsMetadata, ciphers::suite_name};
use crate::net::{Address, Destination};
use anyhow::{Context, Result, anyhow};
use chrono::Utc;
use rustls::ProtocolVersion;
use std::net::SocketAddr;
use tokio::net::TcpStream;
use tokio_rustls::client::TlsStream;
use x509_parser::prelude::{FromDer, X509Certificate};

/// Open a secured connection to `dest` with `config` and report what was
/// negotiated, including the leaf certificate's subject, issuer and expiry.
///
/// The handshake uses full certificate verification.
///
/// # Errors
///
/// Returns an error if the TCP connection, the TLS handshake, or certificate
/// parsing fails.
pub async fn probe(config: &SecurityConfig, dest: &Destination) -> Result<TlsMetadata> {
    let connector = config
        .connector()
        .context("failed to build TLS connector")?;
    let server_name = config
        .server_name_for(dest)
        .with_context(|| format!("invalid server name for {dest}"))?;

    let stream = connect_tcp(dest)
        .await
        .with_context(|| format!("failed to connect to {dest}"))?;

    let tls_stream = connector
        .connect(server_name, stream)
        .await
        .with_context(|| format!("failed to complete TLS handshake with {dest}"))?;

    extract_metadata(&tls_stream).context("failed to extract TLS metadata from stream")
}

async fn connect_tcp(dest: &Destination) -> std::io::Result<TcpStream> {
    match &dest.address {
        Address::Ip(ip) => TcpStream::connect(SocketAddr::new(*ip, dest.port)).await,
        Address::Domain(domain) => TcpStream::connect((domain.as_str(), dest.port)).await,
    }
}

fn version_name(version: ProtocolVersion) -> String {
    match version {
        ProtocolVersion::TLSv1_2 => "TLSv1.2".to_string(),
        ProtocolVersion::TLSv1_3 => "TLSv1.3".to_string(),
        other => format!("{other:?}"),
    }
}

fn extract_metadata(stream: &TlsStream<TcpStream>) -> Result<TlsMetadata> {
    let (_, connection) = stream.get_ref();

    let mut metadata = TlsMetadata {
        version: connection.protocol_version().map(version_name),
        cipher: connection
            .negotiated_cipher_suite()
            .map(|s| suite_name(s.suite())),
        alpn: connection
            .alpn_protocol()
            .map(|p| String::from_utf8_lossy(p).into_owned()),
        ..Default::default()
    };

    if let Some(cert) = connection.peer_certificates().and_then(<[_]>::first) {
        let (subject, issuer, expiry_days) = parse_certificate(cert.as_ref())?;
        metadata.cert_subject = Some(subject);
        metadata.cert_issuer = Some(issuer);
        metadata.cert_expiry_days = Some(expiry_days);
    }

    Ok(metadata)
}

/// Subject, issuer and days until expiry of a DER-encoded certificate
fn parse_certificate(cert_der: &[u8]) -> Result<(String, String, i64)> {
    let (_, cert) = X509Certificate::from_der(cert_der)
        .map_err(|e| anyhow!("failed to parse certificate: {e}"))?;

    let raw = cert.validity().not_after.to_datetime();
    let not_after = chrono::DateTime::<Utc>::from_timestamp(raw.unix_timestamp(), raw.nanosecond())
        .ok_or_else(|| anyhow!("invalid certificate expiry timestamp"))?;
    let remaining = not_after - Utc::now();

    Ok((
        cert.subject().to_string(),
        cert.issuer().to_string(),
        remaining.num_days(),
    ))
}

use serde::Serialize;

/// TLS connection metadata extracted after handshake
#[derive(Debug, Clone, Default, Serialize)]
pub struct TlsMetadata {
    /// TLS protocol version (e.g., "TLSv1.3")
    pub version: Option<String>,
    /// Cipher suite used (e.g., `TLS13_AES_256_GCM_SHA384`)
    pub cipher: Option<String>,
    /// ALPN protocol agreed with the server
    pub alpn: Option<String>,
    /// Certificate subject DN
    pub cert_subject: Option<String>,
    /// Certificate issuer DN
    pub cert_issuer: Option<String>,
    /// Days until certificate expiration (negative if expired)
    pub cert_expiry_days: Option<i64>,
}

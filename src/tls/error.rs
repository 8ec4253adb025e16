/// Errors produced while resolving or converting a security configuration
#[derive(Debug, thiserror::Error)]
pub enum TlsError {
    /// The host could not supply any trust anchors
    #[error("trust store unavailable: {0}")]
    TrustStoreUnavailable(String),

    #[error("invalid server name: {0}")]
    InvalidServerName(String),

    /// Certificate verification is always on for configurations built here
    #[error("certificate verification cannot be disabled")]
    VerificationBypass,

    #[error(transparent)]
    Rustls(#[from] rustls::Error),
}

#![allow(dead_code, clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use rustls::RootCertStore;
use std::sync::Arc;
use tlskit::tls::{
    BundledTrustStore, CipherSettings, ConfigBuilder, SessionCache, TlsError, TrustStore,
    global_session_cache,
};

/// Trust store standing in for a host without any CA bundle
#[derive(Debug)]
pub struct UnavailableTrustStore;

impl TrustStore for UnavailableTrustStore {
    fn load(&self) -> Result<RootCertStore, TlsError> {
        Err(TlsError::TrustStoreUnavailable(
            "no system certificate pool".to_string(),
        ))
    }
}

pub fn ring_provider() -> Arc<rustls::crypto::CryptoProvider> {
    Arc::new(rustls::crypto::ring::default_provider())
}

/// Builder with compiled-in roots and the process-wide session cache, so
/// tests do not depend on the host CA bundle
pub fn test_builder(settings: CipherSettings) -> ConfigBuilder {
    ConfigBuilder::new(
        Arc::new(BundledTrustStore),
        global_session_cache(),
        ring_provider(),
        settings,
    )
}

/// Builder with a private cache
pub fn isolated_builder(settings: CipherSettings) -> ConfigBuilder {
    ConfigBuilder::new(
        Arc::new(BundledTrustStore),
        Arc::new(SessionCache::default()),
        ring_provider(),
        settings,
    )
}

pub fn unavailable_builder() -> ConfigBuilder {
    ConfigBuilder::new(
        Arc::new(UnavailableTrustStore),
        global_session_cache(),
        ring_provider(),
        CipherSettings::default(),
    )
}

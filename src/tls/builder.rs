use super::{
    CipherSettings, SecurityConfig, SessionCache, SystemTrustStore, TlsError, TlsOption,
    TrustStore,
    cache::global_session_cache,
    ciphers::{CipherTable, host_provider},
};
use rustls::crypto::CryptoProvider;
use std::sync::Arc;

/// ALPN list advertised when no option chose one: HTTP/2 first, then HTTP/1.1
pub const DEFAULT_ALPN_PROTOCOLS: [&str; 2] = ["h2", "http/1.1"];

/// Produces resolved security configurations
///
/// Holds the host collaborators (trust store, crypto provider) and the shared
/// session cache; each call to [`ConfigBuilder::build`] is independent.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    trust_store: Arc<dyn TrustStore>,
    session_cache: Arc<SessionCache>,
    provider: Arc<CryptoProvider>,
    settings: CipherSettings,
}

impl ConfigBuilder {
    #[must_use]
    pub fn new(
        trust_store: Arc<dyn TrustStore>,
        session_cache: Arc<SessionCache>,
        provider: Arc<CryptoProvider>,
        settings: CipherSettings,
    ) -> Self {
        Self {
            trust_store,
            session_cache,
            provider,
            settings,
        }
    }

    /// Host trust store, process-wide session cache, host crypto provider
    #[must_use]
    pub fn system(settings: CipherSettings) -> Self {
        Self::new(
            Arc::new(SystemTrustStore::default()),
            global_session_cache(),
            host_provider(),
            settings,
        )
    }

    #[must_use]
    pub fn session_cache(&self) -> &Arc<SessionCache> {
        &self.session_cache
    }

    #[must_use]
    pub const fn settings(&self) -> &CipherSettings {
        &self.settings
    }

    /// Resolve a configuration, applying `options` in the order given.
    ///
    /// Steps: load trust roots, attach the shared session cache, apply each
    /// option, default the ALPN list, then restrict cipher suites by name.
    /// Protocol version bounds stay unset. Cipher names the provider does not
    /// know are skipped.
    ///
    /// # Errors
    ///
    /// Returns `TlsError::TrustStoreUnavailable` if the trust store cannot be
    /// loaded; nothing else fails.
    pub fn build<I>(&self, options: I) -> Result<SecurityConfig, TlsError>
    where
        I: IntoIterator<Item = TlsOption>,
    {
        let roots = self.trust_store.load()?;

        let mut config = SecurityConfig::new(
            roots,
            Arc::clone(&self.session_cache),
            Arc::clone(&self.provider),
        );

        for option in options {
            option(&mut config);
        }

        if config.alpn_protocols.is_empty() {
            config.alpn_protocols = DEFAULT_ALPN_PROTOCOLS.map(String::from).into();
        }

        if !self.settings.cipher_suites.is_empty() {
            let table = CipherTable::from_provider(&self.provider);
            config
                .cipher_suites
                .extend(table.resolve_list(&self.settings.cipher_suites));
        }
        config.prefer_server_cipher_suites = self.settings.prefer_server_cipher_suites;

        log::debug!(
            "resolved TLS config: server_name={:?} alpn={:?} cipher_suites={}",
            config.server_name,
            config.alpn_protocols,
            config.cipher_suites.len()
        );

        Ok(config)
    }
}

/// Build with the host trust store, the process-wide session cache and the
/// host crypto provider.
///
/// # Errors
///
/// Returns `TlsError::TrustStoreUnavailable` if the host has no CA bundle
pub fn build_security_config<I>(
    settings: &CipherSettings,
    options: I,
) -> Result<SecurityConfig, TlsError>
where
    I: IntoIterator<Item = TlsOption>,
{
    ConfigBuilder::system(settings.clone()).build(options)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;
    use crate::{
        net::Destination,
        tls::{BundledTrustStore, with_destination, with_next_protocols},
    };
    use rustls::RootCertStore;

    #[derive(Debug)]
    struct MissingTrustStore;

    impl TrustStore for MissingTrustStore {
        fn load(&self) -> Result<RootCertStore, TlsError> {
            Err(TlsError::TrustStoreUnavailable("no CA bundle".to_string()))
        }
    }

    fn builder(settings: CipherSettings) -> ConfigBuilder {
        ConfigBuilder::new(
            Arc::new(BundledTrustStore),
            Arc::new(SessionCache::default()),
            Arc::new(rustls::crypto::ring::default_provider()),
            settings,
        )
    }

    #[test]
    fn test_build_defaults() {
        let config = builder(CipherSettings::default()).build(Vec::new()).unwrap();
        assert_eq!(config.alpn_protocols, vec!["h2", "http/1.1"]);
        assert!(config.server_name.is_none());
        assert!(config.cipher_suites.is_empty());
        assert!(config.min_version.is_none());
        assert!(config.max_version.is_none());
        assert!(!config.insecure_skip_verify);
        assert!(!config.session_tickets_disabled);
        assert!(!config.prefer_server_cipher_suites);
        assert!(!config.root_store.is_empty());
    }

    #[test]
    fn test_build_attaches_builder_cache() {
        let builder = builder(CipherSettings::default());
        let first = builder.build(Vec::new()).unwrap();
        let second = builder.build(Vec::new()).unwrap();
        assert!(Arc::ptr_eq(&first.session_cache, builder.session_cache()));
        assert!(Arc::ptr_eq(&first.session_cache, &second.session_cache));
    }

    #[test]
    fn test_build_explicit_alpn_not_overridden() {
        let config = builder(CipherSettings::default())
            .build(vec![with_next_protocols(["foo"])])
            .unwrap();
        assert_eq!(config.alpn_protocols, vec!["foo"]);
    }

    #[test]
    fn test_build_applies_options_in_order() {
        let config = builder(CipherSettings::default())
            .build(vec![
                with_next_protocols(["a"]),
                with_next_protocols(["b"]),
                with_destination(&Destination::domain("first.example.com", 443)),
                with_destination(&Destination::domain("second.example.com", 443)),
            ])
            .unwrap();
        assert_eq!(config.alpn_protocols, vec!["a"]);
        assert_eq!(config.server_name.as_deref(), Some("first.example.com"));
    }

    #[test]
    fn test_build_custom_option_closure() {
        let option: TlsOption = Box::new(|config: &mut SecurityConfig| {
            config.server_name = Some("custom.example.com".to_string());
        });
        let config = builder(CipherSettings::default()).build(vec![option]).unwrap();
        assert_eq!(config.server_name.as_deref(), Some("custom.example.com"));
    }

    #[test]
    fn test_build_cipher_suites_best_effort() {
        let settings = CipherSettings::new("TLS_AES_128_GCM_SHA256:NOT_A_REAL_CIPHER", true);
        let config = builder(settings).build(Vec::new()).unwrap();
        assert_eq!(config.cipher_suites, vec![0x1301]);
        assert!(config.prefer_server_cipher_suites);
    }

    #[test]
    fn test_build_cipher_suites_all_unknown() {
        let settings = CipherSettings::new("NOPE:ALSO_NOPE", false);
        let config = builder(settings).build(Vec::new()).unwrap();
        assert!(config.cipher_suites.is_empty());
    }

    #[test]
    fn test_build_cipher_suites_appended_after_options() {
        let option: TlsOption = Box::new(|config: &mut SecurityConfig| {
            config.cipher_suites.push(0x1303);
        });
        let settings = CipherSettings::new("TLS_AES_256_GCM_SHA384", false);
        let config = builder(settings).build(vec![option]).unwrap();
        assert_eq!(config.cipher_suites, vec![0x1303, 0x1302]);
    }

    #[test]
    fn test_build_trust_store_unavailable() {
        let builder = ConfigBuilder::new(
            Arc::new(MissingTrustStore),
            Arc::new(SessionCache::default()),
            Arc::new(rustls::crypto::ring::default_provider()),
            CipherSettings::default(),
        );

        let err = builder.build(vec![with_next_protocols(["h2"])]).unwrap_err();
        assert!(matches!(err, TlsError::TrustStoreUnavailable(_)));
    }

    #[test]
    fn test_build_resolved_config_is_usable() {
        let config = builder(CipherSettings::new("TLS_AES_128_GCM_SHA256", false))
            .build(vec![with_destination(&Destination::domain("example.com", 443))])
            .unwrap();
        let client = config.client_config().unwrap();
        assert_eq!(client.alpn_protocols.len(), 2);
        assert_eq!(client.crypto_provider().cipher_suites.len(), 1);
    }

    #[test]
    fn test_system_builder_uses_global_cache() {
        let builder = ConfigBuilder::system(CipherSettings::default());
        assert!(Arc::ptr_eq(builder.session_cache(), &global_session_cache()));
        assert_eq!(builder.settings(), &CipherSettings::default());
    }
}

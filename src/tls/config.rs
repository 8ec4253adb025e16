use super::{SessionCache, TlsError, ciphers::suite_name};
use crate::net::{Address, Destination};
use rustls::{
    ClientConfig, ProtocolVersion, RootCertStore, SupportedCipherSuite,
    client::{ClientSessionStore, Resumption, Tls12Resumption},
    crypto::CryptoProvider,
    pki_types::ServerName,
};
use serde::Serialize;
use std::sync::Arc;
use tokio_rustls::TlsConnector;

/// Ambient cipher settings owned by the caller's configuration layer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CipherSettings {
    /// Colon-separated cipher suite names, empty means provider defaults
    pub cipher_suites: String,
    pub prefer_server_cipher_suites: bool,
}

impl CipherSettings {
    #[must_use]
    pub fn new(cipher_suites: impl Into<String>, prefer_server_cipher_suites: bool) -> Self {
        Self {
            cipher_suites: cipher_suites.into(),
            prefer_server_cipher_suites,
        }
    }
}

/// Fully resolved client security configuration
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    pub root_store: Arc<RootCertStore>,
    /// Shared with every other configuration, never owned
    pub session_cache: Arc<SessionCache>,
    /// SNI value
    pub server_name: Option<String>,
    /// ALPN protocols in preference order
    pub alpn_protocols: Vec<String>,
    /// Restricted suite identifiers in preference order, empty means all
    pub cipher_suites: Vec<u16>,
    pub prefer_server_cipher_suites: bool,
    /// Reserved, the builder leaves version bounds to the provider defaults
    pub min_version: Option<ProtocolVersion>,
    pub max_version: Option<ProtocolVersion>,
    pub insecure_skip_verify: bool,
    pub session_tickets_disabled: bool,
    /// Provider whose suite table the identifiers were resolved against
    pub provider: Arc<CryptoProvider>,
}

impl SecurityConfig {
    /// Base configuration: verification on, session tickets on, nothing negotiated yet
    #[must_use]
    pub fn new(
        root_store: RootCertStore,
        session_cache: Arc<SessionCache>,
        provider: Arc<CryptoProvider>,
    ) -> Self {
        Self {
            root_store: Arc::new(root_store),
            session_cache,
            server_name: None,
            alpn_protocols: Vec::new(),
            cipher_suites: Vec::new(),
            prefer_server_cipher_suites: false,
            min_version: None,
            max_version: None,
            insecure_skip_verify: false,
            session_tickets_disabled: false,
            provider,
        }
    }

    /// Convert into a rustls client configuration
    ///
    /// # Errors
    ///
    /// Returns `TlsError::VerificationBypass` if verification was switched off,
    /// or a rustls error if no usable cipher suite remains.
    pub fn client_config(&self) -> Result<ClientConfig, TlsError> {
        if self.insecure_skip_verify {
            return Err(TlsError::VerificationBypass);
        }

        let mut provider = CryptoProvider::clone(&self.provider);
        if !self.cipher_suites.is_empty() {
            let mut selected: Vec<SupportedCipherSuite> =
                Vec::with_capacity(self.cipher_suites.len());
            for id in &self.cipher_suites {
                if selected.iter().any(|s| u16::from(s.suite()) == *id) {
                    continue;
                }
                if let Some(suite) = self
                    .provider
                    .cipher_suites
                    .iter()
                    .find(|s| u16::from(s.suite()) == *id)
                {
                    selected.push(*suite);
                }
            }
            provider.cipher_suites = selected;
        }

        let mut config = ClientConfig::builder_with_provider(Arc::new(provider))
            .with_safe_default_protocol_versions()?
            .with_root_certificates(Arc::clone(&self.root_store))
            .with_no_client_auth();

        config.alpn_protocols = self
            .alpn_protocols
            .iter()
            .map(|p| p.as_bytes().to_vec())
            .collect();

        let store: Arc<dyn ClientSessionStore> = self.session_cache.clone();
        config.resumption = Resumption::store(store);
        if self.session_tickets_disabled {
            config.resumption = config
                .resumption
                .tls12_resumption(Tls12Resumption::SessionIdOnly);
        }
        config.enable_sni = true;

        Ok(config)
    }

    /// Connector for opening secured streams with this configuration
    ///
    /// # Errors
    ///
    /// See [`SecurityConfig::client_config`]
    pub fn connector(&self) -> Result<TlsConnector, TlsError> {
        Ok(TlsConnector::from(Arc::new(self.client_config()?)))
    }

    /// Server name presented for `dest`: the configured SNI value, otherwise
    /// the destination's own address.
    ///
    /// # Errors
    ///
    /// Returns `TlsError::InvalidServerName` if the name is not a valid DNS name
    pub fn server_name_for(&self, dest: &Destination) -> Result<ServerName<'static>, TlsError> {
        let host = match (&self.server_name, &dest.address) {
            (Some(name), _) => name.clone(),
            (None, Address::Ip(ip)) => return Ok(ServerName::from(*ip).to_owned()),
            (None, Address::Domain(domain)) => domain.clone(),
        };

        ServerName::try_from(host.clone()).map_err(|_| TlsError::InvalidServerName(host))
    }

    /// Serializable view used for reporting
    #[must_use]
    pub fn summary(&self) -> ConfigSummary {
        let cipher_suites = self
            .cipher_suites
            .iter()
            .map(|id| {
                self.provider
                    .cipher_suites
                    .iter()
                    .find(|s| u16::from(s.suite()) == *id)
                    .map_or_else(|| format!("0x{id:04x}"), |s| suite_name(s.suite()))
            })
            .collect();

        ConfigSummary {
            server_name: self.server_name.clone(),
            alpn_protocols: self.alpn_protocols.clone(),
            cipher_suites,
            prefer_server_cipher_suites: self.prefer_server_cipher_suites,
            min_version: self.min_version.map(|v| format!("{v:?}")),
            max_version: self.max_version.map(|v| format!("{v:?}")),
            trust_anchors: self.root_store.len(),
            session_cache_entries: self.session_cache.len(),
            session_cache_capacity: self.session_cache.capacity(),
            session_tickets_disabled: self.session_tickets_disabled,
            insecure_skip_verify: self.insecure_skip_verify,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfigSummary {
    pub server_name: Option<String>,
    pub alpn_protocols: Vec<String>,
    pub cipher_suites: Vec<String>,
    pub prefer_server_cipher_suites: bool,
    pub min_version: Option<String>,
    pub max_version: Option<String>,
    pub trust_anchors: usize,
    pub session_cache_entries: usize,
    pub session_cache_capacity: usize,
    pub session_tickets_disabled: bool,
    pub insecure_skip_verify: bool,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;
    use crate::tls::{BundledTrustStore, TrustStore};
    use std::net::{IpAddr, Ipv4Addr};

    fn base_config() -> SecurityConfig {
        SecurityConfig::new(
            BundledTrustStore.load().unwrap(),
            Arc::new(SessionCache::default()),
            Arc::new(rustls::crypto::ring::default_provider()),
        )
    }

    #[test]
    fn test_cipher_settings_default() {
        let settings = CipherSettings::default();
        assert!(settings.cipher_suites.is_empty());
        assert!(!settings.prefer_server_cipher_suites);

        let settings = CipherSettings::new("TLS_AES_128_GCM_SHA256", true);
        assert_eq!(settings.cipher_suites, "TLS_AES_128_GCM_SHA256");
        assert!(settings.prefer_server_cipher_suites);
    }

    #[test]
    fn test_security_config_base_defaults() {
        let config = base_config();
        assert!(config.server_name.is_none());
        assert!(config.alpn_protocols.is_empty());
        assert!(config.cipher_suites.is_empty());
        assert!(config.min_version.is_none());
        assert!(config.max_version.is_none());
        assert!(!config.insecure_skip_verify);
        assert!(!config.session_tickets_disabled);
        assert!(!config.root_store.is_empty());
    }

    #[test]
    fn test_client_config_alpn_and_sni() {
        let mut config = base_config();
        config.alpn_protocols = vec!["h2".to_string(), "http/1.1".to_string()];

        let client = config.client_config().unwrap();
        assert_eq!(
            client.alpn_protocols,
            vec![b"h2".to_vec(), b"http/1.1".to_vec()]
        );
        assert!(client.enable_sni);
    }

    #[test]
    fn test_client_config_restricts_suites_in_order() {
        let mut config = base_config();
        config.cipher_suites = vec![0x1302, 0x1301, 0x1302];

        let client = config.client_config().unwrap();
        let ids: Vec<u16> = client
            .crypto_provider()
            .cipher_suites
            .iter()
            .map(|s| u16::from(s.suite()))
            .collect();
        assert_eq!(ids, vec![0x1302, 0x1301]);
    }

    #[test]
    fn test_client_config_unknown_suites_fail() {
        let mut config = base_config();
        config.cipher_suites = vec![0xffff];
        assert!(matches!(config.client_config(), Err(TlsError::Rustls(_))));
    }

    #[test]
    fn test_client_config_rejects_verification_bypass() {
        let mut config = base_config();
        config.insecure_skip_verify = true;
        assert!(matches!(
            config.client_config(),
            Err(TlsError::VerificationBypass)
        ));
        assert!(config.connector().is_err());
    }

    #[test]
    fn test_server_name_for() {
        let mut config = base_config();

        let dest = Destination::domain("example.com", 443);
        let name = config.server_name_for(&dest).unwrap();
        assert_eq!(name, ServerName::try_from("example.com").unwrap());

        let dest = Destination::ip(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)), 443);
        let name = config.server_name_for(&dest).unwrap();
        assert!(matches!(name, ServerName::IpAddress(_)));

        config.server_name = Some("sni.example.org".to_string());
        let name = config.server_name_for(&dest).unwrap();
        assert_eq!(name, ServerName::try_from("sni.example.org").unwrap());

        config.server_name = Some("not a hostname".to_string());
        assert!(matches!(
            config.server_name_for(&dest),
            Err(TlsError::InvalidServerName(_))
        ));
    }

    #[test]
    fn test_summary() {
        let mut config = base_config();
        config.server_name = Some("example.com".to_string());
        config.alpn_protocols = vec!["h2".to_string()];
        config.cipher_suites = vec![0x1301, 0xbeef];

        let summary = config.summary();
        assert_eq!(summary.server_name.as_deref(), Some("example.com"));
        assert_eq!(
            summary.cipher_suites,
            vec!["TLS13_AES_128_GCM_SHA256".to_string(), "0xbeef".to_string()]
        );
        assert_eq!(summary.session_cache_capacity, 256);
        assert!(summary.trust_anchors > 0);

        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"alpn_protocols\":[\"h2\"]"));
        assert!(json.contains("\"min_version\":null"));
    }
}

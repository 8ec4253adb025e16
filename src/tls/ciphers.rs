use rustls::{CipherSuite, crypto::CryptoProvider};
use std::{collections::HashMap, sync::Arc};

/// Crypto provider describing what the host supports
///
/// The process default wins when one was installed, otherwise ring.
#[must_use]
pub fn host_provider() -> Arc<CryptoProvider> {
    CryptoProvider::get_default()
        .cloned()
        .unwrap_or_else(|| Arc::new(rustls::crypto::ring::default_provider()))
}

/// Canonical name of a suite, e.g. `TLS13_AES_128_GCM_SHA256`
#[must_use]
pub fn suite_name(suite: CipherSuite) -> String {
    format!("{suite:?}")
}

/// Human-readable cipher suite name to protocol identifier
#[derive(Debug, Clone, Default)]
pub struct CipherTable {
    by_name: HashMap<String, u16>,
}

impl CipherTable {
    /// Build the table from every suite the provider supports
    ///
    /// TLS 1.3 suites answer to both the rustls spelling
    /// (`TLS13_AES_128_GCM_SHA256`) and the IANA one (`TLS_AES_128_GCM_SHA256`).
    #[must_use]
    pub fn from_provider(provider: &CryptoProvider) -> Self {
        let mut by_name = HashMap::new();

        for supported in &provider.cipher_suites {
            let suite = supported.suite();
            let id = u16::from(suite);
            let name = suite_name(suite);

            if let Some(rest) = name.strip_prefix("TLS13_") {
                by_name.insert(format!("TLS_{rest}"), id);
            }
            by_name.insert(name, id);
        }

        Self { by_name }
    }

    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<u16> {
        self.by_name.get(name).copied()
    }

    /// Resolve a colon-separated list in order.
    ///
    /// Names missing from the table are dropped without error.
    #[must_use]
    pub fn resolve_list(&self, list: &str) -> Vec<u16> {
        list.split(':')
            .filter_map(|name| self.resolve(name.trim()))
            .collect()
    }

    /// All known names, sorted
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.by_name.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

mod run;

use crate::{
    net::Destination,
    tls::{
        BundledTrustStore, CipherSettings, ConfigBuilder, SecurityConfig, SystemTrustStore,
        TrustStore, global_session_cache, host_provider, with_destination, with_next_protocols,
    },
};
use anyhow::Context;
use std::{path::PathBuf, sync::Arc};

/// Where trust anchors come from
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RootsSource {
    /// Host CA bundles
    #[default]
    System,
    /// Compiled-in Mozilla roots
    Bundled,
    /// A single PEM bundle
    File(PathBuf),
}

impl RootsSource {
    #[must_use]
    pub fn trust_store(&self) -> Arc<dyn TrustStore> {
        match self {
            Self::System => Arc::new(SystemTrustStore::default()),
            Self::Bundled => Arc::new(BundledTrustStore),
            Self::File(path) => Arc::new(SystemTrustStore::from_paths(vec![path.clone()])),
        }
    }
}

/// Everything needed to resolve a configuration for one destination
#[derive(Debug, Clone)]
pub struct Request {
    pub destination: Destination,
    pub alpn: Vec<String>,
    pub settings: CipherSettings,
    pub roots: RootsSource,
}

impl Request {
    /// Resolve the configuration with the process-wide session cache
    ///
    /// # Errors
    ///
    /// Returns an error if the trust store cannot be loaded
    pub fn build(&self) -> anyhow::Result<SecurityConfig> {
        let builder = ConfigBuilder::new(
            self.roots.trust_store(),
            global_session_cache(),
            host_provider(),
            self.settings.clone(),
        );

        let mut options = vec![with_destination(&self.destination)];
        if !self.alpn.is_empty() {
            options.push(with_next_protocols(self.alpn.clone()));
        }

        builder
            .build(options)
            .context("failed to build TLS configuration")
    }
}

/// Action enum representing each possible command
#[derive(Debug)]
pub enum Action {
    Show(Request),
    Probe(Request),
    Ciphers,
}

impl Action {
    /// Execute the action
    ///
    /// # Errors
    ///
    /// Returns an error if the action fails to execute
    pub async fn execute(self) -> anyhow::Result<()> {
        run::execute(self).await
    }
}

use super::TlsError;
use rustls::RootCertStore;
use rustls_pemfile::certs;
use std::{
    env, fmt,
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

/// Environment variable pointing at a PEM bundle that overrides the defaults
pub const SSL_CERT_FILE_ENV: &str = "SSL_CERT_FILE";

/// Well-known CA bundle locations across Linux distributions and BSDs
pub const SYSTEM_CERT_FILES: &[&str] = &[
    "/etc/ssl/certs/ca-certificates.crt",
    "/etc/pki/tls/certs/ca-bundle.crt",
    "/etc/ssl/ca-bundle.pem",
    "/etc/pki/tls/cacert.pem",
    "/etc/pki/ca-trust/extracted/pem/tls-ca-bundle.pem",
    "/etc/ssl/cert.pem",
];

/// Source of trust anchors for server certificate verification
pub trait TrustStore: fmt::Debug + Send + Sync {
    /// Load the set of accepted certificate authorities
    ///
    /// # Errors
    ///
    /// Returns `TlsError::TrustStoreUnavailable` if no usable anchors exist
    fn load(&self) -> Result<RootCertStore, TlsError>;
}

/// Trust anchors read from the host's PEM bundles
#[derive(Debug, Clone)]
pub struct SystemTrustStore {
    paths: Vec<PathBuf>,
}

impl SystemTrustStore {
    /// Read only the given PEM files
    #[must_use]
    pub const fn from_paths(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }

    #[must_use]
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }
}

impl Default for SystemTrustStore {
    /// `SSL_CERT_FILE` first when set, then the distribution bundles
    fn default() -> Self {
        let mut paths: Vec<PathBuf> = env::var_os(SSL_CERT_FILE_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .into_iter()
            .collect();
        paths.extend(SYSTEM_CERT_FILES.iter().map(PathBuf::from));

        Self { paths }
    }
}

impl TrustStore for SystemTrustStore {
    fn load(&self) -> Result<RootCertStore, TlsError> {
        let mut roots = RootCertStore::empty();

        for path in &self.paths {
            if !path.is_file() {
                continue;
            }

            match add_pem_file(&mut roots, path) {
                Ok((added, ignored)) => {
                    log::debug!(
                        "loaded {added} trust anchors from {} ({ignored} ignored)",
                        path.display()
                    );
                }
                Err(e) => log::warn!("skipping CA bundle {}: {e}", path.display()),
            }
        }

        if roots.is_empty() {
            return Err(TlsError::TrustStoreUnavailable(format!(
                "no trust anchors found in {}",
                self.paths
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            )));
        }

        Ok(roots)
    }
}

/// Mozilla root program anchors compiled into the binary
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledTrustStore;

impl TrustStore for BundledTrustStore {
    fn load(&self) -> Result<RootCertStore, TlsError> {
        Ok(RootCertStore {
            roots: webpki_roots::TLS_SERVER_ROOTS.to_vec(),
        })
    }
}

fn add_pem_file(roots: &mut RootCertStore, path: &Path) -> std::io::Result<(usize, usize)> {
    let mut reader = BufReader::new(File::open(path)?);
    let parsed = certs(&mut reader).collect::<std::io::Result<Vec<_>>>()?;
    Ok(roots.add_parsable_certificates(parsed))
}

//! TLS client configuration module
//!
//! Turns a set of option functions into a fully resolved client security
//! configuration backed by rustls, with a process-wide session cache shared
//! by every configuration.
//!
//! # Module Organization
//!
//! - `builder` - Configuration builder and ALPN defaults
//! - `options` - Option constructors (destination, ALPN)
//! - `config` - Resolved configuration and the rustls bridge
//! - `cache` - Shared LRU session cache
//! - `roots` - Trust store providers
//! - `ciphers` - Cipher suite name resolution
//! - `probe` - Handshake probing
//! - `metadata` - Negotiated connection metadata
//! - `error` - Error type
//!
//! # Example
//!
//! ```rust,ignore
//! use tlskit::net::Destination;
//! use tlskit::tls::{CipherSettings, build_security_config, with_destination};
//!
//! let dest: Destination = "example.com:443".parse()?;
//! let config = build_security_config(
//!     &CipherSettings::default(),
//!     vec![with_destination(&dest)],
//! )?;
//! let connector = config.connector()?;
//! ```

pub mod builder;
pub mod cache;
pub mod ciphers;
pub mod config;
pub mod error;
pub mod metadata;
pub mod options;
pub mod probe;
pub mod roots;

// Re-export commonly used types
pub use builder::{ConfigBuilder, DEFAULT_ALPN_PROTOCOLS, build_security_config};
pub use cache::{SESSION_CACHE_CAPACITY, SessionCache, global_session_cache};
pub use ciphers::{CipherTable, host_provider};
pub use config::{CipherSettings, ConfigSummary, SecurityConfig};
pub use error::TlsError;
pub use metadata::TlsMetadata;
pub use options::{TlsOption, with_destination, with_next_protocols};
pub use probe::probe;
pub use roots::{BundledTrustStore, SystemTrustStore, TrustStore};

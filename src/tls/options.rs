use super::SecurityConfig;
use crate::net::Destination;

/// One mutation applied to a configuration while it is being built
///
/// Options only write fields that are still empty, so when two options target
/// the same field the one applied first wins.
pub type TlsOption = Box<dyn Fn(&mut SecurityConfig) + Send + Sync>;

/// Use the destination's domain as server name (SNI)
///
/// No-op for IP destinations or when a server name is already set.
#[must_use]
pub fn with_destination(dest: &Destination) -> TlsOption {
    let domain = dest.address.domain().map(ToString::to_string);
    Box::new(move |config: &mut SecurityConfig| {
        if let Some(domain) = &domain
            && config.server_name.is_none()
        {
            config.server_name = Some(domain.clone());
        }
    })
}

/// Advertise the given ALPN protocols, verbatim and in order
///
/// No-op when a protocol list is already set.
#[must_use]
pub fn with_next_protocols<I, S>(protocols: I) -> TlsOption
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let protocols: Vec<String> = protocols.into_iter().map(Into::into).collect();
    Box::new(move |config: &mut SecurityConfig| {
        if config.alpn_protocols.is_empty() {
            config.alpn_protocols.clone_from(&protocols);
        }
    })
}

use crate::lru::LruCache;
use rustls::{
    NamedGroup,
    client::{ClientSessionStore, Tls12ClientSessionValue, Tls13ClientSessionValue},
    pki_types::ServerName,
};
use std::{
    collections::VecDeque,
    fmt,
    sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError},
};

/// Number of servers the shared cache remembers
pub const SESSION_CACHE_CAPACITY: usize = 256;

const MAX_TLS13_TICKETS_PER_SERVER: usize = 8;

static GLOBAL_SESSION_CACHE: OnceLock<Arc<SessionCache>> = OnceLock::new();

/// Process-wide session cache shared by every configuration
///
/// Created on first use and kept for the lifetime of the process. Every call
/// returns a handle to the same instance.
pub fn global_session_cache() -> Arc<SessionCache> {
    Arc::clone(GLOBAL_SESSION_CACHE.get_or_init(|| Arc::new(SessionCache::default())))
}

#[derive(Default)]
struct ServerData {
    kx_hint: Option<NamedGroup>,
    tls12: Option<Tls12ClientSessionValue>,
    tls13: VecDeque<Tls13ClientSessionValue>,
}

/// Bounded store of resumable TLS sessions keyed by server name
///
/// Eviction is strict least-recently-used over server entries: any read or
/// write for a server refreshes it, and storing state for a new server into a
/// full cache silently drops the stalest one.
pub struct SessionCache {
    servers: Mutex<LruCache<ServerName<'static>, ServerData>>,
}

impl SessionCache {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            servers: Mutex::new(LruCache::new(capacity)),
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.lock().capacity()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Whether any state is held for `server_name`, without refreshing it
    #[must_use]
    pub fn contains(&self, server_name: &ServerName<'_>) -> bool {
        self.lock().contains(&server_name.to_owned())
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<ServerName<'static>, ServerData>> {
        self.servers.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn update<F>(&self, server_name: ServerName<'static>, f: F)
    where
        F: FnOnce(&mut ServerData),
    {
        let mut servers = self.lock();
        let (data, evicted) = servers.get_or_insert_with(server_name, ServerData::default);
        f(data);

        if let Some((name, _)) = evicted {
            log::trace!("session cache full, evicted {name:?}");
        }
    }
}

impl Default for SessionCache {
    fn default() -> Self {
        Self::new(SESSION_CACHE_CAPACITY)
    }
}

impl fmt::Debug for SessionCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let servers = self.lock();
        f.debug_struct("SessionCache")
            .field("len", &servers.len())
            .field("capacity", &servers.capacity())
            .finish()
    }
}

impl ClientSessionStore for SessionCache {
    fn set_kx_hint(&self, server_name: ServerName<'static>, group: NamedGroup) {
        self.update(server_name, |data| data.kx_hint = Some(group));
    }

    fn kx_hint(&self, server_name: &ServerName<'_>) -> Option<NamedGroup> {
        self.lock()
            .get(&server_name.to_owned())
            .and_then(|data| data.kx_hint)
    }

    fn set_tls12_session(&self, server_name: ServerName<'static>, value: Tls12ClientSessionValue) {
        self.update(server_name, |data| data.tls12 = Some(value));
    }

    fn tls12_session(&self, server_name: &ServerName<'_>) -> Option<Tls12ClientSessionValue> {
        self.lock()
            .get(&server_name.to_owned())
            .and_then(|data| data.tls12.clone())
    }

    fn remove_tls12_session(&self, server_name: &ServerName<'static>) {
        if let Some(data) = self.lock().get_mut(server_name) {
            data.tls12 = None;
        }
    }

    fn insert_tls13_ticket(&self, server_name: ServerName<'static>, value: Tls13ClientSessionValue) {
        self.update(server_name, |data| {
            if data.tls13.len() >= MAX_TLS13_TICKETS_PER_SERVER {
                data.tls13.pop_front();
            }
            data.tls13.push_back(value);
        });
    }

    fn take_tls13_ticket(&self, server_name: &ServerName<'static>) -> Option<Tls13ClientSessionValue> {
        self.lock()
            .get_mut(server_name)
            .and_then(|data| data.tls13.pop_back())
    }
}

pub mod cli;
pub mod lru;
pub mod net;
pub mod tls;

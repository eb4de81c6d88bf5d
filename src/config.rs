//! Command-line configuration of the API server.
//!
//! Every option can also be provided through an environment variable.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::num::NonZeroUsize;
use std::time::Duration;

use clap::Parser;

use crate::client::DEFAULT_BASE_URL;

/// Serve vlr.gg match listings and match details as cached JSON.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Cli {
    /// Address to listen on
    #[arg(long, env = "VLR_API_HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "VLR_API_PORT", default_value_t = 9091)]
    pub port: u16,

    /// Upstream site the pages are fetched from
    #[arg(long, env = "VLR_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Seconds a response stays fresh in the cache
    #[arg(long, env = "VLR_CACHE_TTL", default_value_t = 15)]
    pub cache_ttl: u64,

    /// Maximum number of cached responses
    #[arg(long, env = "VLR_CACHE_CAPACITY", default_value = "100")]
    pub cache_capacity: NonZeroUsize,
}

impl Cli {
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }
}

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;

use tokio::net::UdpSocket;
use tokio::time::timeout;
use tracing::{debug, trace, warn};

use crate::dns::enums::RecordType;
use crate::dns::name::Name;
use crate::dns::{DnsPacket, IncomingPacket, MAX_PACKET_SIZE};
use crate::error::{DnsError, Result};

const RESOLV_CONF: &str = "/etc/resolv.conf";
const DNS_PORT: u16 = 53;

/// Where and how to ask.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Recursive resolvers, tried in order.
    pub servers: Vec<SocketAddr>,
    /// Per-exchange timeout.
    pub timeout: Duration,
    /// Passes over the server list before giving up.
    pub attempts: u32,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        ResolverConfig {
            servers: default_servers(),
            timeout: Duration::from_secs(5),
            attempts: 2,
        }
    }
}

impl ResolverConfig {
    /// Read the system resolvers from `/etc/resolv.conf`. Only `nameserver`
    /// directives are honored; everything else in the file is ignored. Falls
    /// back to well-known public resolvers when nothing usable is found.
    pub fn from_system() -> Self {
        let servers = match std::fs::read_to_string(RESOLV_CONF) {
            Ok(contents) => parse_resolv_conf(&contents),
            Err(e) => {
                debug!("could not read {}: {}", RESOLV_CONF, e);
                Vec::new()
            }
        };
        if servers.is_empty() {
            debug!("no usable nameserver entries, using defaults");
            ResolverConfig::default()
        } else {
            ResolverConfig { servers, ..ResolverConfig::default() }
        }
    }

    pub fn with_servers(servers: Vec<SocketAddr>) -> Self {
        ResolverConfig { servers, ..ResolverConfig::default() }
    }
}

/// Extract `nameserver` addresses from resolv.conf text.
pub fn parse_resolv_conf(contents: &str) -> Vec<SocketAddr> {
    let mut servers = Vec::new();
    for line in contents.lines() {
        let line = line.trim();
        if line.starts_with('#') || line.starts_with(';') {
            continue;
        }
        let mut words = line.split_whitespace();
        if words.next() != Some("nameserver") {
            continue;
        }
        let Some(addr) = words.next() else { continue };
        match addr.parse::<std::net::IpAddr>() {
            Ok(ip) => servers.push(SocketAddr::new(ip, DNS_PORT)),
            Err(_) => debug!("skipping unparseable nameserver entry: {}", addr),
        }
    }
    servers
}

fn default_servers() -> Vec<SocketAddr> {
    vec![
        SocketAddr::from(([8, 8, 8, 8], DNS_PORT)),
        SocketAddr::from(([1, 1, 1, 1], DNS_PORT)),
    ]
}

/// UDP client for recursive resolvers.
pub struct DnsResolver {
    config: ResolverConfig,
}

impl DnsResolver {
    pub fn new(config: ResolverConfig) -> Self {
        DnsResolver { config }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Ask for `name` / `qtype`, trying each configured server in order and
    /// returning the first decodable reply whose id matches the query.
    pub async fn query(&self, name: &Name, qtype: RecordType) -> Result<IncomingPacket> {
        let id: u16 = rand::random();
        let query = DnsPacket::query(id, name.clone(), qtype);
        let query_bytes = query.serialize()?;
        debug!("query id={:#06x} {} {}", id, name, qtype);

        let mut last_err = DnsError::Timeout;
        for _ in 0..self.config.attempts.max(1) {
            for &server in &self.config.servers {
                match self.exchange(&query_bytes, server).await {
                    Ok(raw) => match IncomingPacket::parse(raw) {
                        Ok(reply) => {
                            if reply.packet().header.id != id {
                                warn!("response id mismatch from {}, discarding", server);
                                last_err = DnsError::IdMismatch;
                                continue;
                            }
                            debug!(
                                "reply from {}: rcode={}, answers={}",
                                server,
                                reply.packet().header.rcode,
                                reply.packet().header.ancount
                            );
                            return Ok(reply);
                        }
                        Err(e) => {
                            debug!("failed to decode reply from {}: {}", server, e);
                            last_err = e;
                        }
                    },
                    Err(e) => {
                        debug!("exchange with {} failed: {}", server, e);
                        last_err = e;
                    }
                }
            }
        }
        Err(last_err)
    }

    /// One send/receive on a connected ephemeral socket.
    async fn exchange(&self, query: &[u8], server: SocketAddr) -> Result<Vec<u8>> {
        let bind_addr = if server.is_ipv6() {
            SocketAddr::new(IpAddr::V6(Ipv6Addr::UNSPECIFIED), 0)
        } else {
            SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 0)
        };
        let socket = UdpSocket::bind(bind_addr).await?;
        socket.connect(server).await?;
        socket.send(query).await?;

        let mut buf = vec![0u8; MAX_PACKET_SIZE];
        let len = timeout(self.config.timeout, socket.recv(&mut buf))
            .await
            .map_err(|_| DnsError::Timeout)??;
        buf.truncate(len);
        trace!("raw response ({} bytes): {:02x?}", len, &buf[..len.min(64)]);
        Ok(buf)
    }
}

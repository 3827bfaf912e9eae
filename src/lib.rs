pub mod dns;
pub mod error;
pub mod resolver;

pub use dns::{DnsPacket, IncomingPacket};
pub use error::{DnsError, Result};

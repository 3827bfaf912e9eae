pub mod cursor;
pub mod enums;
pub mod header;
pub mod name;
pub mod question;
pub mod rdata;
pub mod resource;

use tracing::{debug, trace};

use crate::error::Result;
use cursor::{WireReader, WireWriter};
use enums::RecordType;
use header::DnsHeader;
use name::{Name, NamePool};
use question::Question;
use rdata::RData;
use resource::Resource;

/// Largest datagram the library sends or accepts.
pub const MAX_PACKET_SIZE: usize = 4096;

/// A DNS message: header plus the four sections.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DnsPacket {
    pub header: DnsHeader,
    pub questions: Vec<Question>,
    pub answers: Vec<Resource>,
    pub authorities: Vec<Resource>,
    pub additionals: Vec<Resource>,
}

impl DnsPacket {
    /// Build a recursive query for `name` with a caller-chosen id.
    pub fn query(id: u16, name: Name, qtype: RecordType) -> Self {
        DnsPacket {
            header: DnsHeader { id, rd: true, qdcount: 1, ..DnsHeader::default() },
            questions: vec![Question::new(name, qtype)],
            ..DnsPacket::default()
        }
    }

    /// Decode a message. RDATA is captured opaque, so packets carrying
    /// record types the codec cannot type still decode.
    pub fn parse(buf: &[u8]) -> Result<DnsPacket> {
        Self::parse_with(buf, None)
    }

    /// Decode with an optional name pool shared across the whole message, so
    /// each compression target is walked once.
    pub fn parse_with(buf: &[u8], mut pool: Option<&mut NamePool>) -> Result<DnsPacket> {
        trace!("parsing DNS packet, size: {} bytes", buf.len());
        let mut reader = WireReader::new(buf);
        let header = DnsHeader::decode(&mut reader)?;
        debug!(
            "parsed header: id={}, qr={}, opcode={}, questions={}, answers={}",
            header.id, header.qr, header.opcode, header.qdcount, header.ancount
        );
        let mut questions = Vec::with_capacity(header.qdcount as usize);
        for _ in 0..header.qdcount {
            questions.push(Question::decode(&mut reader, buf, pool.as_deref_mut())?);
        }
        let mut sections = [
            Vec::with_capacity(header.ancount as usize),
            Vec::with_capacity(header.nscount as usize),
            Vec::with_capacity(header.arcount as usize),
        ];
        let counts = [header.ancount, header.nscount, header.arcount];
        for (section, count) in sections.iter_mut().zip(counts) {
            for _ in 0..count {
                section.push(Resource::decode(&mut reader, buf, pool.as_deref_mut())?);
            }
        }
        let [answers, authorities, additionals] = sections;
        Ok(DnsPacket { header, questions, answers, authorities, additionals })
    }

    /// Encode into a caller buffer, returning the bytes written. Header
    /// counters are written as given; they are not recomputed from the
    /// section lengths.
    pub fn encode(&self, writer: &mut WireWriter<'_>) -> Result<usize> {
        let start = writer.written();
        self.header.encode(writer)?;
        for question in &self.questions {
            question.encode(writer)?;
        }
        for resource in self
            .answers
            .iter()
            .chain(&self.authorities)
            .chain(&self.additionals)
        {
            resource.encode(writer)?;
        }
        Ok(writer.written() - start)
    }

    /// Encode into a fresh buffer.
    pub fn serialize(&self) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; MAX_PACKET_SIZE];
        let written = {
            let mut writer = WireWriter::new(&mut buf);
            self.encode(&mut writer)?
        };
        buf.truncate(written);
        Ok(buf)
    }

    /// Whether every header counter matches its section length.
    pub fn valid(&self) -> bool {
        self.header.qdcount as usize == self.questions.len()
            && self.header.ancount as usize == self.answers.len()
            && self.header.nscount as usize == self.authorities.len()
            && self.header.arcount as usize == self.additionals.len()
    }
}

/// A decoded packet that owns its raw datagram and the name pool used while
/// decoding it.
///
/// Opaque RDATA typing has to re-walk the message to resolve compression
/// pointers, so the raw bytes stay alive alongside the structured packet.
#[derive(Debug)]
pub struct IncomingPacket {
    packet: DnsPacket,
    raw: Vec<u8>,
    pool: NamePool,
}

impl IncomingPacket {
    pub fn parse(raw: Vec<u8>) -> Result<IncomingPacket> {
        let mut pool = NamePool::new();
        let packet = DnsPacket::parse_with(&raw, Some(&mut pool))?;
        Ok(IncomingPacket { packet, raw, pool })
    }

    pub fn packet(&self) -> &DnsPacket {
        &self.packet
    }

    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// Type a record's RDATA against this packet's buffer and pool.
    pub fn typed_rdata(&mut self, resource: &Resource) -> Result<RData> {
        resource.typed_rdata(&self.raw, Some(&mut self.pool))
    }

    pub fn into_packet(self) -> DnsPacket {
        self.packet
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_packet_is_valid() {
        assert!(DnsPacket::default().valid());
    }

    #[test]
    fn query_counts_match_sections() {
        let name: Name = "example.com".parse().unwrap();
        let packet = DnsPacket::query(0x1234, name, RecordType::A);
        assert!(packet.valid());
        assert!(packet.header.rd);
        assert_eq!(packet.questions.len(), 1);
    }
}

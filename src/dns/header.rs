use bitstream_io::{BigEndian, BitRead, BitReader, BitWrite, BitWriter};

use crate::dns::cursor::{WireReader, WireWriter};
use crate::dns::enums::{Opcode, ResponseCode};
use crate::error::Result;

/// Encoded size of the header.
pub const HEADER_LEN: usize = 12;

/// The fixed 12-byte DNS message header, RFC 1035 §4.1.1.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DnsHeader {
    pub id: u16,
    /// Query (false) or response (true).
    pub qr: bool,
    pub opcode: Opcode,
    /// Authoritative answer.
    pub aa: bool,
    /// Truncated.
    pub tc: bool,
    /// Recursion desired.
    pub rd: bool,
    /// Recursion available.
    pub ra: bool,
    /// Reserved, must be zero in messages we emit.
    pub z: u8,
    pub rcode: ResponseCode,
    pub qdcount: u16,
    pub ancount: u16,
    pub nscount: u16,
    pub arcount: u16,
}

impl DnsHeader {
    pub fn encode(&self, writer: &mut WireWriter<'_>) -> Result<usize> {
        let mut buf = Vec::with_capacity(HEADER_LEN);
        {
            let mut bits = BitWriter::<_, BigEndian>::new(&mut buf);
            bits.write::<u16>(16, self.id)?;
            bits.write::<u8>(1, self.qr as u8)?;
            bits.write::<u8>(4, self.opcode.to_u8())?;
            bits.write::<u8>(1, self.aa as u8)?;
            bits.write::<u8>(1, self.tc as u8)?;
            bits.write::<u8>(1, self.rd as u8)?;
            bits.write::<u8>(1, self.ra as u8)?;
            bits.write::<u8>(3, self.z)?;
            bits.write::<u8>(4, self.rcode.to_u8())?;
            bits.write::<u16>(16, self.qdcount)?;
            bits.write::<u16>(16, self.ancount)?;
            bits.write::<u16>(16, self.nscount)?;
            bits.write::<u16>(16, self.arcount)?;
        }
        writer.write_bytes(&buf)?;
        Ok(HEADER_LEN)
    }

    pub fn decode(reader: &mut WireReader<'_>) -> Result<DnsHeader> {
        let raw = reader.read_bytes(HEADER_LEN)?;
        let mut bits = BitReader::<_, BigEndian>::new(raw);
        Ok(DnsHeader {
            id: bits.read::<u16>(16)?,
            qr: bits.read::<u8>(1)? == 1,
            opcode: Opcode::from_u8(bits.read::<u8>(4)?),
            aa: bits.read::<u8>(1)? == 1,
            tc: bits.read::<u8>(1)? == 1,
            rd: bits.read::<u8>(1)? == 1,
            ra: bits.read::<u8>(1)? == 1,
            z: bits.read::<u8>(3)?,
            rcode: ResponseCode::from_u8(bits.read::<u8>(4)?),
            qdcount: bits.read::<u16>(16)?,
            ancount: bits.read::<u16>(16)?,
            nscount: bits.read::<u16>(16)?,
            arcount: bits.read::<u16>(16)?,
        })
    }
}

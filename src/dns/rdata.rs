use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

use crate::dns::cursor::{WireReader, WireWriter};
use crate::dns::enums::RecordType;
use crate::dns::name::{Name, NamePool};
use crate::error::{DnsError, Result};

/// Typed resource data.
///
/// Decoding is lazy: a packet keeps RDATA as opaque bytes plus the absolute
/// offset where they sit in the message, and `from_opaque` interprets them on
/// demand. The offset matters because answer RDATA routinely contains
/// compressed names whose pointers are relative to the start of the message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RData {
    A(Ipv4Addr),
    Aaaa(Ipv6Addr),
    Ns(Name),
    Md(Name),
    Mf(Name),
    Cname(Name),
    Mb(Name),
    Mg(Name),
    Mr(Name),
    Ptr(Name),
    Soa {
        mname: Name,
        rname: Name,
        serial: u32,
        refresh: u32,
        retry: u32,
        expire: u32,
        minimum: u32,
    },
    Mx {
        preference: u16,
        exchange: Name,
    },
    Srv {
        priority: u16,
        weight: u16,
        port: u16,
        target: Name,
    },
    /// Every character-string in the RDATA, in wire order.
    Txt(Vec<String>),
}

impl RData {
    /// Interpret an opaque RDATA payload.
    ///
    /// `bytes` is the raw RDATA, `offset` the absolute position of its first
    /// byte within `packet` (the whole message), needed to resolve
    /// compression pointers. Types the codec does not interpret fail with
    /// `UnsupportedResourceType` / `UnknownResourceType`; the opaque bytes
    /// stay available to the caller.
    pub fn from_opaque(
        rtype: RecordType,
        bytes: &[u8],
        offset: usize,
        packet: &[u8],
        mut pool: Option<&mut NamePool>,
    ) -> Result<RData> {
        let mut reader = WireReader::with_base(bytes, offset);
        let mut parse_name =
            |reader: &mut WireReader<'_>| Name::parse_with(reader, packet, pool.as_deref_mut());
        let rdata = match rtype {
            RecordType::A => {
                let octets = reader.read_bytes(4)?;
                RData::A(Ipv4Addr::new(octets[0], octets[1], octets[2], octets[3]))
            }
            RecordType::AAAA => {
                let mut octets = [0u8; 16];
                octets.copy_from_slice(reader.read_bytes(16)?);
                RData::Aaaa(Ipv6Addr::from(octets))
            }
            RecordType::NS => RData::Ns(parse_name(&mut reader)?),
            RecordType::MD => RData::Md(parse_name(&mut reader)?),
            RecordType::MF => RData::Mf(parse_name(&mut reader)?),
            RecordType::CNAME => RData::Cname(parse_name(&mut reader)?),
            RecordType::MB => RData::Mb(parse_name(&mut reader)?),
            RecordType::MG => RData::Mg(parse_name(&mut reader)?),
            RecordType::MR => RData::Mr(parse_name(&mut reader)?),
            RecordType::PTR => RData::Ptr(parse_name(&mut reader)?),
            RecordType::SOA => {
                let mname = parse_name(&mut reader)?;
                let rname = parse_name(&mut reader)?;
                RData::Soa {
                    mname,
                    rname,
                    serial: reader.read_u32()?,
                    refresh: reader.read_u32()?,
                    retry: reader.read_u32()?,
                    expire: reader.read_u32()?,
                    minimum: reader.read_u32()?,
                }
            }
            RecordType::MX => RData::Mx {
                preference: reader.read_u16()?,
                exchange: parse_name(&mut reader)?,
            },
            RecordType::SRV => RData::Srv {
                priority: reader.read_u16()?,
                weight: reader.read_u16()?,
                port: reader.read_u16()?,
                target: parse_name(&mut reader)?,
            },
            RecordType::TXT => {
                let mut strings = Vec::new();
                while !reader.is_empty() {
                    let len = reader.read_u8()? as usize;
                    let bytes = reader.read_bytes(len)?;
                    let text = String::from_utf8(bytes.to_vec())
                        .map_err(|_| DnsError::InvalidLabel)?;
                    strings.push(text);
                }
                if strings.is_empty() {
                    return Err(DnsError::UnexpectedEof);
                }
                RData::Txt(strings)
            }
            RecordType::HINFO
            | RecordType::MINFO
            | RecordType::WKS
            | RecordType::NULL
            | RecordType::OPT => return Err(DnsError::UnsupportedResourceType(rtype)),
            RecordType::Unknown(code) => return Err(DnsError::UnknownResourceType(code)),
        };
        // Trailing bytes mean the rdata length did not match the payload.
        if !reader.is_empty() {
            return Err(DnsError::Overflow);
        }
        Ok(rdata)
    }

    /// The record type this data encodes as.
    pub fn record_type(&self) -> RecordType {
        match self {
            RData::A(_) => RecordType::A,
            RData::Aaaa(_) => RecordType::AAAA,
            RData::Ns(_) => RecordType::NS,
            RData::Md(_) => RecordType::MD,
            RData::Mf(_) => RecordType::MF,
            RData::Cname(_) => RecordType::CNAME,
            RData::Mb(_) => RecordType::MB,
            RData::Mg(_) => RecordType::MG,
            RData::Mr(_) => RecordType::MR,
            RData::Ptr(_) => RecordType::PTR,
            RData::Soa { .. } => RecordType::SOA,
            RData::Mx { .. } => RecordType::MX,
            RData::Srv { .. } => RecordType::SRV,
            RData::Txt(_) => RecordType::TXT,
        }
    }

    /// Wire size of the encoded form. First pass of the two-pass resource
    /// encoder: the rdata length field is written from this, then `encode`
    /// produces the bytes.
    pub fn encoded_len(&self) -> Result<usize> {
        Ok(match self {
            RData::A(_) => 4,
            RData::Aaaa(_) => 16,
            RData::Ns(name)
            | RData::Md(name)
            | RData::Mf(name)
            | RData::Cname(name)
            | RData::Mb(name)
            | RData::Mg(name)
            | RData::Mr(name)
            | RData::Ptr(name) => name.encoded_len(),
            RData::Soa { mname, rname, .. } => mname.encoded_len() + rname.encoded_len() + 20,
            RData::Mx { exchange, .. } => 2 + exchange.encoded_len(),
            RData::Srv { target, .. } => 6 + target.encoded_len(),
            RData::Txt(strings) => {
                if strings.is_empty() {
                    return Err(DnsError::MissingData);
                }
                let mut total = 0;
                for s in strings {
                    if s.len() > 255 {
                        return Err(DnsError::Overflow);
                    }
                    total += 1 + s.len();
                }
                total
            }
        })
    }

    /// Write the wire form (names uncompressed) and return the bytes
    /// produced.
    pub fn encode(&self, writer: &mut WireWriter<'_>) -> Result<usize> {
        let start = writer.written();
        match self {
            RData::A(addr) => writer.write_bytes(&addr.octets())?,
            RData::Aaaa(addr) => writer.write_bytes(&addr.octets())?,
            RData::Ns(name)
            | RData::Md(name)
            | RData::Mf(name)
            | RData::Cname(name)
            | RData::Mb(name)
            | RData::Mg(name)
            | RData::Mr(name)
            | RData::Ptr(name) => {
                name.encode(writer)?;
            }
            RData::Soa { mname, rname, serial, refresh, retry, expire, minimum } => {
                mname.encode(writer)?;
                rname.encode(writer)?;
                writer.write_u32(*serial)?;
                writer.write_u32(*refresh)?;
                writer.write_u32(*retry)?;
                writer.write_u32(*expire)?;
                writer.write_u32(*minimum)?;
            }
            RData::Mx { preference, exchange } => {
                writer.write_u16(*preference)?;
                exchange.encode(writer)?;
            }
            RData::Srv { priority, weight, port, target } => {
                writer.write_u16(*priority)?;
                writer.write_u16(*weight)?;
                writer.write_u16(*port)?;
                target.encode(writer)?;
            }
            RData::Txt(strings) => {
                if strings.is_empty() {
                    return Err(DnsError::MissingData);
                }
                for s in strings {
                    if s.len() > 255 {
                        return Err(DnsError::Overflow);
                    }
                    writer.write_u8(s.len() as u8)?;
                    writer.write_bytes(s.as_bytes())?;
                }
            }
        }
        Ok(writer.written() - start)
    }
}

impl fmt::Display for RData {
    /// Zone-file presentation of the RDATA.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RData::A(addr) => write!(f, "{addr}"),
            RData::Aaaa(addr) => write!(f, "{addr}"),
            RData::Ns(name)
            | RData::Md(name)
            | RData::Mf(name)
            | RData::Cname(name)
            | RData::Mb(name)
            | RData::Mg(name)
            | RData::Mr(name)
            | RData::Ptr(name) => write!(f, "{name}"),
            RData::Soa { mname, rname, serial, refresh, retry, expire, minimum } => {
                write!(f, "{mname} {rname} {serial} {refresh} {retry} {expire} {minimum}")
            }
            RData::Mx { preference, exchange } => write!(f, "{preference} {exchange}"),
            RData::Srv { priority, weight, port, target } => {
                write!(f, "{priority} {weight} {port} {target}")
            }
            RData::Txt(strings) => {
                let mut first = true;
                for s in strings {
                    if !first {
                        write!(f, " ")?;
                    }
                    write!(f, "\"{s}\"")?;
                    first = false;
                }
                Ok(())
            }
        }
    }
}

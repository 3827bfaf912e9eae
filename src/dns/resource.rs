use crate::dns::cursor::{WireReader, WireWriter};
use crate::dns::enums::{RecordClass, RecordType};
use crate::dns::name::{Name, NamePool};
use crate::dns::rdata::RData;
use crate::error::{DnsError, Result};

/// Resource data as carried by a record.
///
/// Decoding leaves RDATA raw: the payload bytes plus the absolute offset of
/// their first byte in the packet, enough to type them later with
/// `RData::from_opaque`. Records built for encoding carry typed data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordData {
    Raw { bytes: Vec<u8>, offset: usize },
    Typed(RData),
}

/// A resource record: answer, authority or additional section entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resource {
    pub name: Name,
    pub rtype: RecordType,
    pub rclass: RecordClass,
    pub ttl: i32,
    pub rdata: RecordData,
}

impl Resource {
    pub fn new(name: Name, ttl: i32, rdata: RData) -> Self {
        Resource {
            name,
            rtype: rdata.record_type(),
            rclass: RecordClass::IN,
            ttl,
            rdata: RecordData::Typed(rdata),
        }
    }

    pub fn decode(
        reader: &mut WireReader<'_>,
        packet: &[u8],
        pool: Option<&mut NamePool>,
    ) -> Result<Resource> {
        let name = Name::parse_with(reader, packet, pool)?;
        let rtype = RecordType::from(reader.read_u16()?);
        let rclass = RecordClass::from(reader.read_u16()?);
        let ttl = reader.read_u32()? as i32;
        let rdlength = reader.read_u16()? as usize;
        let offset = reader.position();
        let bytes = reader.read_bytes(rdlength)?.to_vec();
        Ok(Resource { name, rtype, rclass, ttl, rdata: RecordData::Raw { bytes, offset } })
    }

    pub fn encode(&self, writer: &mut WireWriter<'_>) -> Result<usize> {
        let start = writer.written();
        self.name.encode(writer)?;
        writer.write_u16(self.rtype.into())?;
        writer.write_u16(self.rclass.into())?;
        writer.write_u32(self.ttl as u32)?;
        match &self.rdata {
            RecordData::Raw { bytes, .. } => {
                let len = u16::try_from(bytes.len()).map_err(|_| DnsError::Overflow)?;
                writer.write_u16(len)?;
                writer.write_bytes(bytes)?;
            }
            RecordData::Typed(rdata) => {
                let len = u16::try_from(rdata.encoded_len()?).map_err(|_| DnsError::Overflow)?;
                writer.write_u16(len)?;
                rdata.encode(writer)?;
            }
        }
        Ok(writer.written() - start)
    }

    /// Type the RDATA. `packet` must be the raw message this record was
    /// decoded from, so compression pointers inside the payload can be
    /// resolved.
    pub fn typed_rdata(&self, packet: &[u8], pool: Option<&mut NamePool>) -> Result<RData> {
        match &self.rdata {
            RecordData::Raw { bytes, offset } => {
                RData::from_opaque(self.rtype, bytes, *offset, packet, pool)
            }
            RecordData::Typed(rdata) => Ok(rdata.clone()),
        }
    }

    /// The raw RDATA bytes, for callers handling types the codec does not.
    pub fn raw_rdata(&self) -> Option<&[u8]> {
        match &self.rdata {
            RecordData::Raw { bytes, .. } => Some(bytes),
            RecordData::Typed(_) => None,
        }
    }
}

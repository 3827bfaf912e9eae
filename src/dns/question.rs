use crate::dns::cursor::{WireReader, WireWriter};
use crate::dns::enums::{RecordClass, RecordType};
use crate::dns::name::{Name, NamePool};
use crate::error::Result;

/// A question section entry: name, type, class.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Question {
    pub name: Name,
    pub qtype: RecordType,
    pub qclass: RecordClass,
}

impl Question {
    pub fn new(name: Name, qtype: RecordType) -> Self {
        Question { name, qtype, qclass: RecordClass::IN }
    }

    pub fn encode(&self, writer: &mut WireWriter<'_>) -> Result<usize> {
        let mut written = self.name.encode(writer)?;
        writer.write_u16(self.qtype.into())?;
        writer.write_u16(self.qclass.into())?;
        written += 4;
        Ok(written)
    }

    pub fn decode(
        reader: &mut WireReader<'_>,
        packet: &[u8],
        pool: Option<&mut NamePool>,
    ) -> Result<Question> {
        let name = Name::parse_with(reader, packet, pool)?;
        let qtype = RecordType::from(reader.read_u16()?);
        let qclass = RecordClass::from(reader.read_u16()?);
        Ok(Question { name, qtype, qclass })
    }
}

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::dns::cursor::{WireReader, WireWriter};
use crate::error::{DnsError, Result};

/// Length bytes with the top two bits set introduce a two-byte compression
/// pointer; the `01` and `10` patterns are reserved.
const POINTER_MASK: u8 = 0xC0;

/// A domain name: an ordered sequence of labels.
///
/// Labels are always owned, so a decoded `Name` stays valid after the packet
/// buffer it came from is dropped. A fully decoded name never contains a
/// compression pointer; pointers are resolved during decode. The empty name
/// is the root.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Name {
    labels: Vec<String>,
}

impl Name {
    /// Maximum encoded length of a name, terminator included.
    pub const MAX_WIRE_LEN: usize = 255;
    /// Maximum number of labels in a name.
    pub const MAX_LABELS: usize = 127;
    /// Maximum length of a single label.
    pub const MAX_LABEL_LEN: usize = 63;

    pub fn root() -> Self {
        Name::default()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn is_root(&self) -> bool {
        self.labels.is_empty()
    }

    /// Encoded size on the wire: one length byte per label plus its bytes,
    /// plus the terminating zero byte.
    pub fn encoded_len(&self) -> usize {
        self.labels.iter().map(|l| 1 + l.len()).sum::<usize>() + 1
    }

    /// Write the uncompressed wire form and return the number of bytes
    /// produced. The encoder never emits compression pointers.
    pub fn encode(&self, writer: &mut WireWriter<'_>) -> Result<usize> {
        let start = writer.written();
        let mut wire_len = 1usize;
        for label in &self.labels {
            if label.len() > Self::MAX_LABEL_LEN {
                return Err(DnsError::LabelTooLong);
            }
            wire_len += 1 + label.len();
            if wire_len > Self::MAX_WIRE_LEN {
                return Err(DnsError::NameTooLong);
            }
            writer.write_u8(label.len() as u8)?;
            writer.write_bytes(label.as_bytes())?;
        }
        writer.write_u8(0)?;
        Ok(writer.written() - start)
    }

    /// Decode a name, following compression pointers against `packet` (the
    /// full enclosing message). Every label is freshly allocated.
    pub fn parse(reader: &mut WireReader<'_>, packet: &[u8]) -> Result<Name> {
        Self::parse_with(reader, packet, None)
    }

    /// Decode with an optional pool: pointer targets already decoded for this
    /// packet are aliased out of the pool instead of being walked again.
    pub(crate) fn parse_with(
        reader: &mut WireReader<'_>,
        packet: &[u8],
        mut pool: Option<&mut NamePool>,
    ) -> Result<Name> {
        let start = reader.position();
        let mut builder = NameBuilder::default();
        loop {
            let len = reader.read_u8()?;
            match len & POINTER_MASK {
                0 => {
                    if len == 0 {
                        break;
                    }
                    builder.push(reader.read_bytes(len as usize)?)?;
                }
                POINTER_MASK => {
                    let second = reader.read_u8()?;
                    let pointer_at = reader.position() - 2;
                    let target = pointer_offset(len, second);
                    // A pointer may only reference data earlier in the
                    // packet. The name is complete once the first pointer is
                    // resolved; the reader stays just past the pointer.
                    if target >= pointer_at {
                        return Err(DnsError::InvalidPointer);
                    }
                    for label in labels_from(packet, target, pool.as_deref_mut())? {
                        builder.push_owned(label)?;
                    }
                    break;
                }
                _ => return Err(DnsError::InvalidLabelType),
            }
        }
        let name = builder.finish();
        if let Some(pool) = pool {
            pool.insert(start, name.clone());
        }
        Ok(name)
    }

    /// Advance the reader past a name without building it. A pointer ends the
    /// name after its second byte.
    pub fn skip(reader: &mut WireReader<'_>) -> Result<()> {
        loop {
            let len = reader.read_u8()?;
            match len & POINTER_MASK {
                0 => {
                    if len == 0 {
                        return Ok(());
                    }
                    reader.skip(len as usize)?;
                }
                POINTER_MASK => {
                    reader.skip(1)?;
                    return Ok(());
                }
                _ => return Err(DnsError::InvalidLabelType),
            }
        }
    }
}

impl FromStr for Name {
    type Err = DnsError;

    /// Parse dotted text. A single trailing dot is allowed and dropped; any
    /// other empty label is rejected.
    fn from_str(s: &str) -> Result<Name> {
        if s == "." {
            return Ok(Name::root());
        }
        let mut parts: Vec<&str> = s.split('.').collect();
        if parts.last() == Some(&"") {
            parts.pop();
        }
        let mut builder = NameBuilder::default();
        for part in parts {
            if part.is_empty() {
                return Err(DnsError::EmptyLabel);
            }
            builder.push(part.as_bytes())?;
        }
        Ok(builder.finish())
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return write!(f, ".");
        }
        for label in &self.labels {
            write!(f, "{label}.")?;
        }
        Ok(())
    }
}

/// Accumulates labels while enforcing the per-label and whole-name limits.
#[derive(Default)]
struct NameBuilder {
    labels: Vec<String>,
    wire_len: usize,
}

impl NameBuilder {
    fn push(&mut self, bytes: &[u8]) -> Result<()> {
        let label = String::from_utf8(bytes.to_vec()).map_err(|_| DnsError::InvalidLabel)?;
        self.push_owned(label)
    }

    fn push_owned(&mut self, label: String) -> Result<()> {
        if label.len() > Name::MAX_LABEL_LEN {
            return Err(DnsError::LabelTooLong);
        }
        if self.labels.len() == Name::MAX_LABELS {
            return Err(DnsError::NameTooLong);
        }
        self.wire_len += 1 + label.len();
        // The terminator byte still has to fit.
        if self.wire_len + 1 > Name::MAX_WIRE_LEN {
            return Err(DnsError::NameTooLong);
        }
        self.labels.push(label);
        Ok(())
    }

    fn finish(self) -> Name {
        Name { labels: self.labels }
    }
}

fn pointer_offset(first: u8, second: u8) -> usize {
    (((first & !POINTER_MASK) as usize) << 8) | second as usize
}

/// Walk the labels of the name starting at absolute `start` in `packet`,
/// resolving nested pointers. Every pointer must target an offset strictly
/// below its own position, and no pointer is followed twice while
/// assembling one name, so a crafted cycle fails with `InvalidPointer`
/// instead of looping.
fn labels_from(
    packet: &[u8],
    start: usize,
    mut pool: Option<&mut NamePool>,
) -> Result<Vec<String>> {
    let mut builder = NameBuilder::default();
    // Offsets whose suffixes become cacheable once the walk completes, with
    // the index of their first label.
    let mut segments: Vec<(usize, usize)> = Vec::new();
    // Positions of pointers already followed; revisiting one is a cycle.
    let mut followed: Vec<usize> = Vec::new();
    let mut segment = start;
    let mut offset = start;
    'walk: loop {
        if offset == segment {
            if let Some(pool) = pool.as_deref_mut() {
                if let Some(cached) = pool.cached(segment) {
                    for label in cached.labels().to_vec() {
                        builder.push_owned(label)?;
                    }
                    break 'walk;
                }
            }
            segments.push((segment, builder.labels.len()));
        }
        let len = *packet.get(offset).ok_or(DnsError::UnexpectedEof)?;
        match len & POINTER_MASK {
            0 => {
                if len == 0 {
                    break 'walk;
                }
                let end = offset + 1 + len as usize;
                let bytes = packet.get(offset + 1..end).ok_or(DnsError::UnexpectedEof)?;
                builder.push(bytes)?;
                offset = end;
            }
            POINTER_MASK => {
                let second = *packet.get(offset + 1).ok_or(DnsError::UnexpectedEof)?;
                let target = pointer_offset(len, second);
                if target >= offset || followed.contains(&offset) {
                    return Err(DnsError::InvalidPointer);
                }
                followed.push(offset);
                segment = target;
                offset = target;
            }
            _ => return Err(DnsError::InvalidLabelType),
        }
    }
    let labels = builder.finish().labels;
    if let Some(pool) = pool {
        for (offset, first_label) in segments {
            pool.insert(offset, Name { labels: labels[first_label..].to_vec() });
        }
    }
    Ok(labels)
}

/// Per-packet interning cache for decoded names, keyed by the absolute offset
/// of the name's first byte. Compression pointers into an offset that has
/// already been decoded alias the cached labels instead of re-walking the
/// packet. Names handed out are owned and survive `clear` and drop.
#[derive(Debug, Default)]
pub struct NamePool {
    cache: HashMap<usize, Name>,
}

impl NamePool {
    pub fn new() -> Self {
        NamePool::default()
    }

    /// Decode a name through the cache.
    pub fn parse(&mut self, reader: &mut WireReader<'_>, packet: &[u8]) -> Result<Name> {
        Name::parse_with(reader, packet, Some(self))
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Drop every cached name. Names already returned are unaffected.
    pub fn clear(&mut self) {
        self.cache.clear();
    }

    fn cached(&self, offset: usize) -> Option<&Name> {
        self.cache.get(&offset)
    }

    fn insert(&mut self, offset: usize, name: Name) {
        self.cache.entry(offset).or_insert(name);
    }
}

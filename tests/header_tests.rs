use munin::dns::cursor::{WireReader, WireWriter};
use munin::dns::enums::{Opcode, ResponseCode};
use munin::dns::header::{DnsHeader, HEADER_LEN};

fn encode(header: &DnsHeader) -> Vec<u8> {
    let mut buf = [0u8; HEADER_LEN];
    let mut writer = WireWriter::new(&mut buf);
    header.encode(&mut writer).expect("failed to write header");
    buf.to_vec()
}

fn decode(bytes: &[u8]) -> DnsHeader {
    let mut reader = WireReader::new(bytes);
    DnsHeader::decode(&mut reader).expect("failed to read header")
}

#[test]
fn test_header_read_write_roundtrip() {
    let original = DnsHeader {
        id: 0xABCD,
        qr: true,
        opcode: Opcode::Status,
        aa: true,
        tc: false,
        rd: true,
        ra: false,
        z: 0,
        rcode: ResponseCode::NameError,
        qdcount: 5,
        ancount: 2,
        nscount: 1,
        arcount: 0,
    };

    let parsed = decode(&encode(&original));
    assert_eq!(parsed, original);
}

#[test]
fn test_header_flags_packing() {
    let header = DnsHeader {
        id: 0x1234,
        qr: true,                          // bit 15
        opcode: Opcode::Unknown(0xA),      // bits 14-11 (1010)
        aa: true,                          // bit 10
        tc: false,                         // bit 9
        rd: true,                          // bit 8
        ra: false,                         // bit 7
        z: 0x5,                            // bits 6-4 (101)
        rcode: ResponseCode::Unknown(0xF), // bits 3-0 (1111)
        ..Default::default()
    };

    let buffer = encode(&header);
    assert_eq!(buffer[0], 0x12); // ID high byte
    assert_eq!(buffer[1], 0x34); // ID low byte
    assert_eq!(buffer[2], 0xD5); // QR=1, Opcode=1010, AA=1, TC=0, RD=1
    assert_eq!(buffer[3], 0x5F); // RA=0, Z=101, RCODE=1111
}

#[test]
fn test_header_default_values() {
    let header = DnsHeader::default();

    assert_eq!(header.id, 0);
    assert!(!header.qr);
    assert_eq!(header.opcode, Opcode::Query);
    assert!(!header.aa);
    assert!(!header.tc);
    assert!(!header.rd);
    assert!(!header.ra);
    assert_eq!(header.z, 0);
    assert_eq!(header.rcode, ResponseCode::NoError);
    assert_eq!(header.qdcount, 0);
    assert_eq!(header.ancount, 0);
    assert_eq!(header.nscount, 0);
    assert_eq!(header.arcount, 0);
}

#[test]
fn test_unknown_opcode_and_rcode_pass_through() {
    let mut bytes = vec![0u8; HEADER_LEN];
    // QR=1, opcode=13 (unassigned), rcode=11 (unassigned).
    bytes[2] = 0x80 | (13 << 3);
    bytes[3] = 11;

    let header = decode(&bytes);
    assert_eq!(header.opcode, Opcode::Unknown(13));
    assert_eq!(header.rcode, ResponseCode::Unknown(11));
    assert_eq!(encode(&header), bytes);
}

#[test]
fn test_flags_word_roundtrips_for_zero_z() {
    // Every 16-bit flags word whose reserved z bits are clear must survive
    // decode followed by encode bit-for-bit.
    for word in 0u32..=0xFFFF {
        let word = word as u16;
        if word & 0x0070 != 0 {
            continue;
        }
        let mut bytes = vec![0u8; HEADER_LEN];
        bytes[2..4].copy_from_slice(&word.to_be_bytes());
        let header = decode(&bytes);
        let reencoded = encode(&header);
        assert_eq!(
            u16::from_be_bytes([reencoded[2], reencoded[3]]),
            word,
            "flags word {word:#06x} did not round-trip"
        );
    }
}

#[test]
fn test_truncated_header_rejected() {
    let bytes = [0u8; HEADER_LEN - 1];
    let mut reader = WireReader::new(&bytes);
    assert!(DnsHeader::decode(&mut reader).is_err());
}

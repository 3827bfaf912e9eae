use munin::dns::cursor::WireWriter;
use munin::dns::enums::RecordType;
use munin::dns::name::Name;
use munin::dns::rdata::RData;
use munin::error::DnsError;

/// Packet scaffold with `example.com` at offset 12, as a question name
/// would sit in a real reply.
fn scaffold() -> Vec<u8> {
    let mut packet = vec![0u8; 12];
    packet.extend_from_slice(b"\x07example\x03com\x00");
    packet
}

/// Append `rdata` to the packet and return its absolute offset.
fn append_rdata(packet: &mut Vec<u8>, rdata: &[u8]) -> usize {
    let offset = packet.len();
    packet.extend_from_slice(rdata);
    offset
}

fn encode(rdata: &RData) -> Result<Vec<u8>, DnsError> {
    let mut buf = [0u8; 512];
    let written = {
        let mut writer = WireWriter::new(&mut buf);
        rdata.encode(&mut writer)?
    };
    Ok(buf[..written].to_vec())
}

#[test]
fn test_a_record() {
    let packet = [93u8, 184, 216, 34];
    let rdata = RData::from_opaque(RecordType::A, &packet, 0, &packet, None).unwrap();
    assert_eq!(rdata, RData::A("93.184.216.34".parse().unwrap()));
    assert_eq!(encode(&rdata).unwrap(), packet);
    assert_eq!(rdata.encoded_len().unwrap(), 4);
}

#[test]
fn test_a_record_length_mismatch() {
    let short = [93u8, 184, 216];
    assert!(matches!(
        RData::from_opaque(RecordType::A, &short, 0, &short, None),
        Err(DnsError::UnexpectedEof)
    ));
    let long = [93u8, 184, 216, 34, 0];
    assert!(matches!(
        RData::from_opaque(RecordType::A, &long, 0, &long, None),
        Err(DnsError::Overflow)
    ));
}

#[test]
fn test_aaaa_record() {
    let bytes: [u8; 16] = [
        0x26, 0x06, 0x28, 0x00, 0x02, 0x20, 0x00, 0x01, 0x02, 0x48, 0x18, 0x93, 0x25, 0xc8,
        0x19, 0x46,
    ];
    let rdata = RData::from_opaque(RecordType::AAAA, &bytes, 0, &bytes, None).unwrap();
    assert_eq!(rdata, RData::Aaaa("2606:2800:220:1:248:1893:25c8:1946".parse().unwrap()));
    assert_eq!(encode(&rdata).unwrap(), bytes);
}

#[test]
fn test_mx_with_compressed_exchange() {
    let mut packet = scaffold();
    let offset = append_rdata(&mut packet, &[0x00, 0x0A, 0xC0, 0x0C]);

    let rdata =
        RData::from_opaque(RecordType::MX, &packet[offset..], offset, &packet, None).unwrap();
    assert_eq!(
        rdata,
        RData::Mx { preference: 10, exchange: "example.com".parse().unwrap() }
    );
}

#[test]
fn test_srv_with_compressed_target() {
    let mut packet = scaffold();
    let offset = append_rdata(&mut packet, &[0x00, 0x05, 0x00, 0x0A, 0x1F, 0x90, 0xC0, 0x0C]);

    let rdata =
        RData::from_opaque(RecordType::SRV, &packet[offset..], offset, &packet, None).unwrap();
    assert_eq!(
        rdata,
        RData::Srv {
            priority: 5,
            weight: 10,
            port: 8080,
            target: "example.com".parse().unwrap(),
        }
    );
}

#[test]
fn test_cname_with_compressed_name() {
    let mut packet = scaffold();
    let offset = append_rdata(&mut packet, &[0x03, b'w', b'w', b'w', 0xC0, 0x0C]);

    let rdata =
        RData::from_opaque(RecordType::CNAME, &packet[offset..], offset, &packet, None).unwrap();
    assert_eq!(rdata, RData::Cname("www.example.com".parse().unwrap()));
}

#[test]
fn test_soa_record() {
    let soa = RData::Soa {
        mname: "ns1.example.com".parse().unwrap(),
        rname: "hostmaster.example.com".parse().unwrap(),
        serial: 2024010101,
        refresh: 7200,
        retry: 3600,
        expire: 1209600,
        minimum: 86400,
    };
    let wire = encode(&soa).unwrap();
    assert_eq!(wire.len(), soa.encoded_len().unwrap());

    let decoded = RData::from_opaque(RecordType::SOA, &wire, 0, &wire, None).unwrap();
    assert_eq!(decoded, soa);
}

#[test]
fn test_txt_decodes_every_string() {
    let mut wire = Vec::new();
    wire.push(5);
    wire.extend_from_slice(b"first");
    wire.push(6);
    wire.extend_from_slice(b"second");

    let rdata = RData::from_opaque(RecordType::TXT, &wire, 0, &wire, None).unwrap();
    assert_eq!(rdata, RData::Txt(vec!["first".to_string(), "second".to_string()]));
    assert_eq!(encode(&rdata).unwrap(), wire);
    assert_eq!(rdata.to_string(), "\"first\" \"second\"");
}

#[test]
fn test_txt_string_length_boundary() {
    let max = RData::Txt(vec!["x".repeat(255)]);
    let wire = encode(&max).unwrap();
    assert_eq!(wire.len(), 256);
    assert_eq!(RData::from_opaque(RecordType::TXT, &wire, 0, &wire, None).unwrap(), max);

    let over = RData::Txt(vec!["x".repeat(256)]);
    assert!(matches!(encode(&over), Err(DnsError::Overflow)));
    assert!(matches!(over.encoded_len(), Err(DnsError::Overflow)));
}

#[test]
fn test_txt_without_strings_is_missing_data() {
    let empty = RData::Txt(Vec::new());
    assert!(matches!(encode(&empty), Err(DnsError::MissingData)));
    assert!(matches!(empty.encoded_len(), Err(DnsError::MissingData)));
}

#[test]
fn test_txt_truncated_string_rejected() {
    let wire = [0x05, b'a', b'b'];
    assert!(matches!(
        RData::from_opaque(RecordType::TXT, &wire, 0, &wire, None),
        Err(DnsError::UnexpectedEof)
    ));
}

#[test]
fn test_unsupported_types_reported() {
    for rtype in [
        RecordType::HINFO,
        RecordType::MINFO,
        RecordType::WKS,
        RecordType::NULL,
        RecordType::OPT,
    ] {
        let bytes = [0u8; 4];
        assert!(matches!(
            RData::from_opaque(rtype, &bytes, 0, &bytes, None),
            Err(DnsError::UnsupportedResourceType(t)) if t == rtype
        ));
    }
}

#[test]
fn test_unknown_type_reported() {
    let bytes = [0u8; 4];
    assert!(matches!(
        RData::from_opaque(RecordType::Unknown(4711), &bytes, 0, &bytes, None),
        Err(DnsError::UnknownResourceType(4711))
    ));
}

#[test]
fn test_record_type_mapping() {
    let name: Name = "example.com".parse().unwrap();
    assert_eq!(RData::A("127.0.0.1".parse().unwrap()).record_type(), RecordType::A);
    assert_eq!(RData::Ns(name.clone()).record_type(), RecordType::NS);
    assert_eq!(RData::Ptr(name.clone()).record_type(), RecordType::PTR);
    assert_eq!(
        RData::Mx { preference: 0, exchange: name }.record_type(),
        RecordType::MX
    );
}

#[test]
fn test_encoded_len_matches_encode() {
    let name: Name = "mail.example.com".parse().unwrap();
    let cases = vec![
        RData::A("10.0.0.1".parse().unwrap()),
        RData::Aaaa("::1".parse().unwrap()),
        RData::Ns(name.clone()),
        RData::Mx { preference: 20, exchange: name.clone() },
        RData::Srv { priority: 1, weight: 2, port: 53, target: name },
        RData::Txt(vec!["hello".to_string(), "world".to_string()]),
    ];
    for rdata in cases {
        assert_eq!(encode(&rdata).unwrap().len(), rdata.encoded_len().unwrap());
    }
}

use munin::dns::enums::{Opcode, RecordClass, RecordType, ResponseCode};
use munin::error::DnsError;

#[test]
fn test_record_type_code_roundtrip() {
    let cases = [
        (RecordType::A, 1),
        (RecordType::NS, 2),
        (RecordType::MD, 3),
        (RecordType::MF, 4),
        (RecordType::CNAME, 5),
        (RecordType::SOA, 6),
        (RecordType::MB, 7),
        (RecordType::MG, 8),
        (RecordType::MR, 9),
        (RecordType::NULL, 10),
        (RecordType::WKS, 11),
        (RecordType::PTR, 12),
        (RecordType::HINFO, 13),
        (RecordType::MINFO, 14),
        (RecordType::MX, 15),
        (RecordType::TXT, 16),
        (RecordType::AAAA, 28),
        (RecordType::SRV, 33),
        (RecordType::OPT, 41),
    ];
    for (rtype, code) in cases {
        assert_eq!(u16::from(rtype), code);
        assert_eq!(RecordType::from(code), rtype);
    }
}

#[test]
fn test_unknown_codes_are_preserved() {
    assert_eq!(RecordType::from(999), RecordType::Unknown(999));
    assert_eq!(u16::from(RecordType::Unknown(999)), 999);
    assert_eq!(RecordClass::from(250), RecordClass::Unknown(250));
    assert_eq!(u16::from(RecordClass::Unknown(250)), 250);
}

#[test]
fn test_record_type_from_str() {
    assert_eq!("A".parse::<RecordType>().unwrap(), RecordType::A);
    assert_eq!("aaaa".parse::<RecordType>().unwrap(), RecordType::AAAA);
    assert_eq!("Mx".parse::<RecordType>().unwrap(), RecordType::MX);
    assert_eq!("srv".parse::<RecordType>().unwrap(), RecordType::SRV);
    assert!(matches!(
        "BOGUS".parse::<RecordType>(),
        Err(DnsError::InvalidRRType(s)) if s == "BOGUS"
    ));
}

#[test]
fn test_record_class_from_str() {
    assert_eq!("in".parse::<RecordClass>().unwrap(), RecordClass::IN);
    assert_eq!("CH".parse::<RecordClass>().unwrap(), RecordClass::CH);
    assert!("XX".parse::<RecordClass>().is_err());
}

#[test]
fn test_display_names() {
    assert_eq!(RecordType::AAAA.to_string(), "AAAA");
    assert_eq!(RecordType::Unknown(4711).to_string(), "TYPE4711");
    assert_eq!(RecordClass::IN.to_string(), "IN");
    assert_eq!(ResponseCode::NameError.to_string(), "NXDOMAIN");
    assert_eq!(ResponseCode::Unknown(13).to_string(), "RCODE13");
    assert_eq!(Opcode::Query.to_string(), "QUERY");
}

#[test]
fn test_opcode_and_rcode_codes() {
    for code in 0u8..16 {
        assert_eq!(Opcode::from_u8(code).to_u8(), code);
        assert_eq!(ResponseCode::from_u8(code).to_u8(), code);
    }
    assert_eq!(Opcode::from_u8(0), Opcode::Query);
    assert_eq!(ResponseCode::from_u8(3), ResponseCode::NameError);
}

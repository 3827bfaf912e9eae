use std::sync::Arc;
use thiserror::Error;

use crate::dns::enums::RecordType;

/// Unified error type for the munin DNS library and tools.
#[derive(Debug, Clone, Error)]
pub enum DnsError {
    // Wire format errors: the input is malformed and the packet should be
    // discarded by the caller.
    #[error("unexpected end of packet")]
    UnexpectedEof,
    #[error("reserved label type bits")]
    InvalidLabelType,
    #[error("invalid DNS label")]
    InvalidLabel,
    #[error("compression pointer does not target an earlier offset")]
    InvalidPointer,
    #[error("DNS name exceeds 255 bytes or 127 labels")]
    NameTooLong,
    #[error("DNS label exceeds 63 bytes")]
    LabelTooLong,
    #[error("empty label in DNS name")]
    EmptyLabel,
    #[error("field exceeds its wire-format bounds")]
    Overflow,

    // Capability errors: well-formed input this codec does not interpret.
    // The opaque RDATA bytes remain available to the caller.
    #[error("resource type {0} is not supported by the codec")]
    UnsupportedResourceType(RecordType),
    #[error("unknown resource type code {0}")]
    UnknownResourceType(u16),
    #[error("unknown resource type name: {0}")]
    InvalidRRType(String),

    // Contract errors: the caller handed the encoder an inconsistent value.
    #[error("record data is missing a required field")]
    MissingData,

    // Resource and transport errors.
    #[error("invalid upstream server: {0}")]
    InvalidUpstreamServer(String),
    #[error("output buffer is full")]
    BufferFull,
    #[error("IO error: {0}")]
    Io(Arc<std::io::Error>),
    #[error("upstream query timed out")]
    Timeout,
    #[error("response id does not match the query")]
    IdMismatch,
}

impl From<std::io::Error> for DnsError {
    fn from(err: std::io::Error) -> Self {
        DnsError::Io(Arc::new(err))
    }
}

pub type Result<T> = std::result::Result<T, DnsError>;

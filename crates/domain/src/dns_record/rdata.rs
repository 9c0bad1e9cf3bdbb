use super::RecordType;
use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, Ipv6Addr};

/// Type-specific answer payload.
///
/// Types without a structured variant travel as raw wire bytes in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RData {
    A(Ipv4Addr),
    AAAA(Ipv6Addr),
    CNAME(String),
    NS(String),
    PTR(String),
    MX { preference: u16, exchange: String },
    /// Character-strings as sent on the wire; TXT data need not be UTF-8.
    TXT(Vec<Vec<u8>>),
    Other { code: u16, data: Vec<u8> },
}

impl RData {
    /// The record type this payload encodes.
    pub fn record_type(&self) -> RecordType {
        match self {
            RData::A(_) => RecordType::A,
            RData::AAAA(_) => RecordType::AAAA,
            RData::CNAME(_) => RecordType::CNAME,
            RData::NS(_) => RecordType::NS,
            RData::PTR(_) => RecordType::PTR,
            RData::MX { .. } => RecordType::MX,
            RData::TXT(_) => RecordType::TXT,
            RData::Other { code, .. } => RecordType::from_u16(*code),
        }
    }
}

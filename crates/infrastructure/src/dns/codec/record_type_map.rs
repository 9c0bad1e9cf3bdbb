//! Mapping between the domain record types/classes and `hickory_proto`'s.
//!
//! Both sides use IANA codes, so the mapping is lossless in both
//! directions, unknown codes included.

use hickory_proto::op::ResponseCode as HickoryResponseCode;
use hickory_proto::rr::{DNSClass as HickoryClass, RecordType as HickoryRecordType};
use ndns_domain::{DnsClass, RecordType, ResponseCode};

pub struct RecordTypeMapper;

impl RecordTypeMapper {
    pub fn to_hickory(record_type: RecordType) -> HickoryRecordType {
        match record_type {
            RecordType::A => HickoryRecordType::A,
            RecordType::AAAA => HickoryRecordType::AAAA,
            RecordType::CNAME => HickoryRecordType::CNAME,
            RecordType::MX => HickoryRecordType::MX,
            RecordType::TXT => HickoryRecordType::TXT,
            RecordType::PTR => HickoryRecordType::PTR,
            RecordType::NS => HickoryRecordType::NS,
            RecordType::SOA => HickoryRecordType::SOA,
            RecordType::HTTPS => HickoryRecordType::HTTPS,
            other => HickoryRecordType::from(other.to_u16()),
        }
    }

    pub fn from_hickory(hickory_type: HickoryRecordType) -> RecordType {
        RecordType::from_u16(u16::from(hickory_type))
    }
}

pub struct ClassMapper;

impl ClassMapper {
    pub fn to_hickory(class: DnsClass) -> HickoryClass {
        match class {
            DnsClass::IN => HickoryClass::IN,
            DnsClass::CH => HickoryClass::CH,
            DnsClass::HS => HickoryClass::HS,
            DnsClass::ANY => HickoryClass::ANY,
            other => HickoryClass::from(other.to_u16()),
        }
    }

    pub fn from_hickory(class: HickoryClass) -> DnsClass {
        DnsClass::from_u16(u16::from(class))
    }
}

pub struct RcodeMapper;

impl RcodeMapper {
    pub fn to_hickory(rcode: ResponseCode) -> HickoryResponseCode {
        match rcode {
            ResponseCode::NoError => HickoryResponseCode::NoError,
            ResponseCode::FormErr => HickoryResponseCode::FormErr,
            ResponseCode::ServFail => HickoryResponseCode::ServFail,
            ResponseCode::NxDomain => HickoryResponseCode::NXDomain,
            ResponseCode::NotImp => HickoryResponseCode::NotImp,
            ResponseCode::Refused => HickoryResponseCode::Refused,
            ResponseCode::Unknown(code) => HickoryResponseCode::Unknown(code),
        }
    }

    pub fn from_hickory(rcode: HickoryResponseCode) -> ResponseCode {
        match rcode {
            HickoryResponseCode::NoError => ResponseCode::NoError,
            HickoryResponseCode::FormErr => ResponseCode::FormErr,
            HickoryResponseCode::ServFail => ResponseCode::ServFail,
            HickoryResponseCode::NXDomain => ResponseCode::NxDomain,
            HickoryResponseCode::NotImp => ResponseCode::NotImp,
            HickoryResponseCode::Refused => ResponseCode::Refused,
            other => ResponseCode::from_u16(u16::from(other)),
        }
    }
}

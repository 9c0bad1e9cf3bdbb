use hickory_proto::rr::rdata::{A, AAAA, CNAME, MX, NS, NULL, PTR, TXT};
use hickory_proto::rr::{Name, RData as HickoryRData};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder, EncodeMode};
use ndns_domain::{DomainError, RData};
use std::str::FromStr;

use super::record_type_map::RecordTypeMapper;

pub(super) fn parse_name(name: &str) -> Result<Name, DomainError> {
    if name.is_empty() || name == "." {
        return Ok(Name::root());
    }
    let mut parsed = Name::from_str(name).map_err(|e| {
        DomainError::InvalidDomainName(format!("Invalid domain '{}': {}", name, e))
    })?;
    parsed.set_fqdn(true);
    Ok(parsed)
}

pub(super) fn name_to_string(name: &Name) -> String {
    ndns_domain::normalize_domain(&name.to_ascii())
}

pub(super) fn to_hickory(rdata: &RData) -> Result<HickoryRData, DomainError> {
    let converted = match rdata {
        RData::A(ip) => HickoryRData::A(A(*ip)),
        RData::AAAA(ip) => HickoryRData::AAAA(AAAA(*ip)),
        RData::CNAME(target) => HickoryRData::CNAME(CNAME(parse_name(target)?)),
        RData::NS(target) => HickoryRData::NS(NS(parse_name(target)?)),
        RData::PTR(target) => HickoryRData::PTR(PTR(parse_name(target)?)),
        RData::MX {
            preference,
            exchange,
        } => HickoryRData::MX(MX::new(*preference, parse_name(exchange)?)),
        RData::TXT(chunks) => HickoryRData::TXT(TXT::from_bytes(
            chunks.iter().map(Vec::as_slice).collect(),
        )),
        RData::Other { code, data } => HickoryRData::Unknown {
            code: RecordTypeMapper::to_hickory(ndns_domain::RecordType::from_u16(*code)),
            rdata: NULL::with(data.clone()),
        },
    };
    Ok(converted)
}

pub(super) fn from_hickory(rdata: &HickoryRData) -> Result<RData, DomainError> {
    let converted = match rdata {
        HickoryRData::A(a) => RData::A(a.0),
        HickoryRData::AAAA(aaaa) => RData::AAAA(aaaa.0),
        HickoryRData::CNAME(cname) => RData::CNAME(name_to_string(&cname.0)),
        HickoryRData::NS(ns) => RData::NS(name_to_string(&ns.0)),
        HickoryRData::PTR(ptr) => RData::PTR(name_to_string(&ptr.0)),
        HickoryRData::MX(mx) => RData::MX {
            preference: mx.preference(),
            exchange: name_to_string(mx.exchange()),
        },
        HickoryRData::TXT(txt) => {
            RData::TXT(txt.txt_data().iter().map(|chunk| chunk.to_vec()).collect())
        }
        other => RData::Other {
            code: u16::from(other.record_type()),
            data: opaque_bytes(other)?,
        },
    };
    Ok(converted)
}

/// Raw rdata for types the domain model does not spell out. Names inside are
/// written uncompressed so the bytes stay valid outside their original message.
fn opaque_bytes(rdata: &HickoryRData) -> Result<Vec<u8>, DomainError> {
    let mut buf = Vec::with_capacity(64);
    let mut encoder = BinEncoder::with_mode(&mut buf, EncodeMode::Signing);
    rdata
        .emit(&mut encoder)
        .map_err(|e| DomainError::MalformedPacket(format!("Unreadable rdata: {}", e)))?;
    Ok(buf)
}

use super::{DnsClass, RData, RecordType};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub name: Arc<str>,
    pub record_type: RecordType,
    pub class: DnsClass,
    pub ttl: u32,
    pub rdata: RData,
}

impl Answer {
    /// Builds an answer whose declared type is taken from the payload.
    pub fn new(name: &str, ttl: u32, rdata: RData) -> Self {
        Self {
            name: crate::normalize_domain(name).into(),
            record_type: rdata.record_type(),
            class: DnsClass::IN,
            ttl,
            rdata,
        }
    }

    /// Whether the declared type matches the payload. Wire encoding rejects
    /// answers where it does not.
    pub fn is_consistent(&self) -> bool {
        self.rdata.record_type() == self.record_type
    }
}

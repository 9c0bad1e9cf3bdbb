use super::{DnsClass, RecordType};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// The question section of a DNS message.
///
/// Names are kept lowercase without the trailing root dot, which is the form
/// used for cache keys and filter-list lookups. Replies restore the client's
/// spelling through [`crate::Response::with_question_name`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Question {
    pub name: Arc<str>,
    pub record_type: RecordType,
    pub class: DnsClass,
}

impl Question {
    pub fn new(name: &str, record_type: RecordType, class: DnsClass) -> Self {
        Self {
            name: crate::normalize_domain(name).into(),
            record_type,
            class,
        }
    }

    pub fn internet(name: &str, record_type: RecordType) -> Self {
        Self::new(name, record_type, DnsClass::IN)
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.name, self.class, self.record_type)
    }
}

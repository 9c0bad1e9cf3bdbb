//! Key scheme shared by every cache store backend.
//!
//! | key | value |
//! |---|---|
//! | `doh:q:{name}:{type}:{class}` | cached [`Response`] |
//! | `doh:count` | query counter, never expires |
//! | `filter:lists:{name}` | [`ListDescriptor`] registry entry |
//! | `filter:l:{list}:{domain}` | membership marker |

use super::{ListDescriptor, Question, Response};
use serde::{Deserialize, Serialize};

pub const QUERY_COUNT_KEY: &str = "doh:count";

pub fn answer_key(question: &Question) -> String {
    format!(
        "doh:q:{}:{}:{}",
        question.name, question.record_type, question.class
    )
}

pub fn list_registry_key(list_name: &str) -> String {
    format!("filter:lists:{}", list_name)
}

pub fn list_member_key(list_name: &str, domain: &str) -> String {
    format!("filter:l:{}:{}", list_name, domain)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CacheValue {
    Response(Response),
    List(ListDescriptor),
    Marker,
    Counter(u64),
}

impl CacheValue {
    pub fn into_response(self) -> Option<Response> {
        match self {
            CacheValue::Response(response) => Some(response),
            _ => None,
        }
    }

    pub fn into_list(self) -> Option<ListDescriptor> {
        match self {
            CacheValue::List(descriptor) => Some(descriptor),
            _ => None,
        }
    }

    pub fn as_counter(&self) -> Option<u64> {
        match self {
            CacheValue::Counter(count) => Some(*count),
            _ => None,
        }
    }
}

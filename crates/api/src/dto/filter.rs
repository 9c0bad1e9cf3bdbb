use ndns_domain::{FilterAction, ListDescriptor};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Debug)]
pub struct LoadListRequest {
    pub uri: String,
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ListResponse {
    pub name: String,
    pub uri: String,
    pub ttl: u32,
    pub file_path: String,
    pub updated: String,
}

impl ListResponse {
    pub fn from_descriptor(descriptor: ListDescriptor) -> Self {
        Self {
            file_path: descriptor.file_path.to_string_lossy().into_owned(),
            updated: descriptor.updated.to_rfc3339(),
            name: descriptor.name,
            uri: descriptor.uri,
            ttl: descriptor.ttl,
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct CheckDomainQuery {
    pub domain: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CheckDomainResponse {
    pub list: String,
    pub domain: String,
    pub action: FilterAction,
}

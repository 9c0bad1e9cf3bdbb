use serde::Deserialize;

/// Query string of a DoH GET: `?dns=<base64url>`.
#[derive(Deserialize, Debug)]
pub struct DohQuery {
    pub dns: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct ResolveQuery {
    pub name: String,
    #[serde(rename = "type", default = "default_record_type")]
    pub record_type: String,
}

fn default_record_type() -> String {
    "A".to_string()
}

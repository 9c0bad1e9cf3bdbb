use ndns_domain::normalize_domain;
use std::net::IpAddr;

/// Extracts the membership entry carried by one line of a filter list.
///
/// Blank lines and lines starting with `#` yield `None`; every other line
/// yields exactly one entry. Hosts lines (`0.0.0.0 ads.example`) contribute
/// their host name and `||domain^` rules their domain. Anything else is taken
/// up to the first whitespace or inline `#`.
pub fn parse_list_line(line: &str) -> Option<String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let line = line.split('#').next().unwrap_or(line);
    let mut tokens = line.split_whitespace();
    let first = tokens.next()?;

    if let Some(inner) = first.strip_prefix("||") {
        let domain = inner.split('^').next().unwrap_or(inner);
        return entry(domain, first);
    }

    if first.parse::<IpAddr>().is_ok() {
        if let Some(host) = tokens.next() {
            return entry(host, host);
        }
    }

    entry(first, first)
}

fn entry(candidate: &str, raw: &str) -> Option<String> {
    let domain = normalize_domain(candidate);
    if domain.is_empty() {
        Some(raw.to_string())
    } else {
        Some(domain)
    }
}

//! `parseURL`

use url::Host;
use waypoint_core::Url;

/// Parse an endpoint URL into its components
///
/// Only `http` and `https` URLs without a query string are accepted.
/// `authority` and `path` keep the exact text of the input; the `url` crate
/// is used for validation and host classification only.
pub fn parse_url(input: &str) -> Option<Url> {
    let parsed = url::Url::parse(input).ok()?;
    let scheme = parsed.scheme();
    if scheme != "http" && scheme != "https" {
        return None;
    }
    if parsed.query().is_some() || input.contains('?') {
        return None;
    }

    let is_ip = matches!(parsed.host(), Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)));

    let rest = input.split_once("://").map(|(_, rest)| rest)?;
    let rest = rest.split('#').next().unwrap_or_default();
    let (authority, path) = match rest.find('/') {
        Some(pos) => (&rest[..pos], &rest[pos..]),
        None => (rest, ""),
    };
    if authority.is_empty() {
        return None;
    }

    Some(Url {
        scheme: scheme.to_string(),
        authority: authority.to_string(),
        path: path.to_string(),
        normalized_path: normalize_path(path),
        is_ip,
    })
}

fn normalize_path(path: &str) -> String {
    let mut normalized = String::with_capacity(path.len() + 2);
    if !path.starts_with('/') {
        normalized.push('/');
    }
    normalized.push_str(path);
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    normalized
}

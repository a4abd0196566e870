//! Deriving the harvester target domain from a source URL.

use url::Url;

/// Host of `source_url` with a leading `www.` removed.
///
/// Returns `None` when the URL does not parse or has no host. The port,
/// if any, is dropped.
#[must_use]
pub fn domain_from_url(source_url: &str) -> Option<String> {
    let parsed = Url::parse(source_url).ok()?;
    let host = parsed.host_str()?;
    let host = host.strip_prefix("www.").unwrap_or(host);

    (!host.is_empty()).then(|| host.to_string())
}

use thiserror::Error;
use url::Url;

/// Link-submission API origin.
pub const DEFAULT_ENDPOINT: &str = "http://data.zz.baidu.com";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    #[error("site {site:?} is not an absolute url: {reason}")]
    InvalidSite { site: String, reason: String },
    #[error("site {0:?} has no host")]
    MissingHost(String),
}

/// Rebuild `permalink` on the configured site's scheme and host.
///
/// Path and query are copied verbatim from the permalink text: no
/// percent-encoding and no dot-segment removal. Everything else comes from
/// `site`. A permalink without an authority is taken as a path on the site.
/// The fragment is dropped and an empty query does not leave a bare `?`.
pub fn normalize_permalink(permalink: &str, site: &str) -> Result<String, NormalizeError> {
    let site_url = Url::parse(site.trim()).map_err(|err| NormalizeError::InvalidSite {
        site: site.to_string(),
        reason: err.to_string(),
    })?;
    let host = site_url
        .host_str()
        .ok_or_else(|| NormalizeError::MissingHost(site.to_string()))?;

    let (path, query) = split_path_and_query(permalink.trim());
    let mut normalized = format!("{}://{}", site_url.scheme(), host);
    if !path.is_empty() && !path.starts_with('/') {
        normalized.push('/');
    }
    normalized.push_str(path);
    if let Some(query) = query.filter(|q| !q.is_empty()) {
        normalized.push('?');
        normalized.push_str(query);
    }
    Ok(normalized)
}

/// Raw path and query of `permalink`, skipping any `scheme://authority`.
fn split_path_and_query(permalink: &str) -> (&str, Option<&str>) {
    let without_fragment = permalink.split('#').next().unwrap_or_default();
    let rest = match authority_start(without_fragment) {
        Some(start) => {
            let authority_and_rest = &without_fragment[start..];
            let end = authority_and_rest
                .find(['/', '?'])
                .unwrap_or(authority_and_rest.len());
            &authority_and_rest[end..]
        }
        None => without_fragment,
    };
    match rest.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (rest, None),
    }
}

/// Byte offset of the authority for `scheme://..` and `//..` forms.
fn authority_start(permalink: &str) -> Option<usize> {
    if permalink.starts_with("//") {
        return Some(2);
    }
    let (scheme, _) = permalink.split_once("://")?;
    let mut chars = scheme.chars();
    let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    valid.then_some(scheme.len() + 3)
}

/// The API rejects a trailing slash on `site` as a domain mismatch.
pub fn clean_site(site: &str) -> &str {
    site.trim_end_matches('/')
}

/// `{endpoint}/urls?site=..&token=..`, values inserted verbatim.
pub fn build_api_url(endpoint: &str, site: &str, token: &str) -> String {
    format!(
        "{}/urls?site={}&token={}",
        endpoint.trim_end_matches('/'),
        clean_site(site),
        token
    )
}

use std::borrow::Cow;

use url::Url;

use crate::error::SiteError;

/// Parse a url that path segments can be appended to.
pub fn parse_base_url(url: &str) -> Result<Url, SiteError> {
    let parsed = Url::parse(url).map_err(|err| SiteError::InvalidUrl(Cow::Owned(format!("{url}: {err}"))))?;

    if parsed.cannot_be_a_base() || parsed.host_str().is_none() {
        return Err(SiteError::InvalidUrl(Cow::Owned(format!("{url}: not a base url"))));
    }

    Ok(parsed)
}

/// Append path segments to a base url, treating a trailing slash as an empty last segment.
pub fn with_segments(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();

    // Base urls are validated by `parse_base_url`, so this cannot fail.
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }

    url
}

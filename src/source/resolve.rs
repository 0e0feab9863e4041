use crate::{DpkgError, Result};
use url::Url;

/// Resolves an href from the index page into an absolute URL
///
/// An href that already carries a scheme is returned as parsed. Anything
/// else is treated as a relative reference and joined against `base_url`
/// (RFC 3986 resolution: `..`, `.`, queries and fragments included).
///
/// # Errors
///
/// Returns [`DpkgError::InvalidHref`] if the href is not a valid URL
/// reference.
///
/// # Example
///
/// ```
/// use dpkg_builder::source::resolve_href;
/// use url::Url;
///
/// let base = Url::parse("https://packages.debian.org/buster/hello").unwrap();
/// let url = resolve_href("/pool/main/h/hello/hello_2.10-2.dsc", &base).unwrap();
/// assert_eq!(url.as_str(), "https://packages.debian.org/pool/main/h/hello/hello_2.10-2.dsc");
/// ```
pub fn resolve_href(href: &str, base_url: &Url) -> Result<Url> {
    let invalid = |source: url::ParseError| DpkgError::InvalidHref {
        href: href.to_string(),
        source,
    };

    match Url::parse(href) {
        Ok(absolute) => Ok(absolute),
        Err(url::ParseError::RelativeUrlWithoutBase) => base_url.join(href).map_err(invalid),
        Err(e) => Err(invalid(e)),
    }
}

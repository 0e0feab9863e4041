//! HTML parser for extracting anchor hrefs from a package index page

use scraper::{Html, Selector};

/// Extracts the `href` of every `<a>` tag in document order
///
/// Anchors without an `href` attribute are skipped. No filtering or
/// resolution happens here; the raw attribute values are returned so the
/// classifier sees exactly what the page links to.
///
/// Parsing is best-effort: malformed markup is recovered by the HTML5
/// parser and never produces an error.
///
/// # Example
///
/// ```
/// use dpkg_builder::index::extract_hrefs;
///
/// let html = r#"<a href="foo_1.0.dsc">dsc</a><a name="top">top</a>"#;
/// assert_eq!(extract_hrefs(html), vec!["foo_1.0.dsc".to_string()]);
/// ```
pub fn extract_hrefs(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);

    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .map(str::to_string)
        .collect()
}

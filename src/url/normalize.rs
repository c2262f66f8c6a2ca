use crate::UrlError;
use url::Url;

/// Canonicalizes a product URL by truncating it at the first `?`
///
/// The base item URL is the unit of identity: two links to the same product
/// that differ only in tracking parameters fetch the same page.
///
/// # Examples
///
/// ```
/// use price_tracker::url::canonicalize;
///
/// let url = canonicalize("https://market.yandex.ru/card/mouse/123?clid=9");
/// assert_eq!(url, "https://market.yandex.ru/card/mouse/123");
/// ```
pub fn canonicalize(url: &str) -> &str {
    match url.find('?') {
        Some(idx) => &url[..idx],
        None => url,
    }
}

/// Validates that a URL submitted for tracking is an absolute HTTP(S) URL
///
/// # Returns
///
/// * `Ok(Url)` - The parsed URL
/// * `Err(UrlError)` - The URL is malformed, has another scheme, or no host
pub fn validate_product_url(url_str: &str) -> Result<Url, UrlError> {
    let url = Url::parse(url_str).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingDomain);
    }

    Ok(url)
}

/// Returns true if a free-form search query refers to the marketplace
///
/// Queries are matched by substring so that pasted links without a scheme
/// (`market.yandex.ru/card/...`) are still recognised.
pub fn is_marketplace_url(query: &str, host: &str) -> bool {
    !host.is_empty() && query.to_lowercase().contains(&host.to_lowercase())
}

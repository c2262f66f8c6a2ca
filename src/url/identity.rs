//! Product identity derived from the page URL
//!
//! Both helpers work on the URL alone so that a scrape can still name the
//! product when the page markup is missing a usable title.

use once_cell::sync::Lazy;
use regex::Regex;

/// Token used when the URL carries no digits at all
pub const FALLBACK_PRODUCT_ID: &str = "yamarket";

/// Title used when the URL has no `/card/<slug>/` segment
pub const FALLBACK_TITLE: &str = "Товар Яндекс.Маркет";

/// Maximum number of trailing digits kept by the digit-strip fallback
const MAX_ID_DIGITS: usize = 10;

static TRAILING_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/(\d+)(?:\?|$)").expect("valid product id pattern"));

static CARD_SLUG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/card/([^/]+)/").expect("valid card slug pattern"));

/// Derives the external product identifier from a product URL
///
/// 1. A numeric path segment immediately before `?` or the end of the URL
///    is used verbatim.
/// 2. Otherwise every non-digit is removed and the last ten digits are kept.
/// 3. A URL without any digit yields [`FALLBACK_PRODUCT_ID`].
///
/// # Examples
///
/// ```
/// use price_tracker::url::derive_product_id;
///
/// let id = derive_product_id("https://market.yandex.ru/card/wireless-mouse-x1/123456");
/// assert_eq!(id, "123456");
/// ```
pub fn derive_product_id(url: &str) -> String {
    if let Some(id) = TRAILING_ID.captures(url).and_then(|caps| caps.get(1)) {
        return id.as_str().to_string();
    }

    let digits: Vec<char> = url.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return FALLBACK_PRODUCT_ID.to_string();
    }

    let start = digits.len().saturating_sub(MAX_ID_DIGITS);
    digits[start..].iter().collect()
}

/// Builds a human-readable title from the `/card/<slug>/` URL segment
///
/// Hyphens become spaces and the result is title-cased; URLs without a card
/// segment get [`FALLBACK_TITLE`].
///
/// # Examples
///
/// ```
/// use price_tracker::url::title_from_url;
///
/// let title = title_from_url("https://market.yandex.ru/card/wireless-mouse-x1/123456");
/// assert_eq!(title, "Wireless Mouse X1");
/// ```
pub fn title_from_url(url: &str) -> String {
    CARD_SLUG
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|slug| title_case(&slug.as_str().replace('-', " ")))
        .unwrap_or_else(|| FALLBACK_TITLE.to_string())
}

/// Uppercases the first letter of every alphabetic run and lowercases the rest
fn title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut previous_is_alpha = false;

    for c in text.chars() {
        if c.is_alphabetic() {
            if previous_is_alpha {
                result.extend(c.to_lowercase());
            } else {
                result.extend(c.to_uppercase());
            }
            previous_is_alpha = true;
        } else {
            result.push(c);
            previous_is_alpha = false;
        }
    }

    result
}

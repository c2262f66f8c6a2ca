//! Price and title extraction for marketplace product pages
//!
//! This module is pure: it works on the page text and the source URL only.
//! Each field is found with an ordered cascade of strategies where the first
//! strategy that matches decides the value.
//!
//! Price strategies, in order:
//! 1. A JSON field `"price": "<digits>"` anywhere in the payload
//! 2. The `data-auto="price-value"` element followed by digits and `₽`
//! 3. A `"formattedPrice"` JSON field with digits and `₽`
//!
//! Title strategies, in order:
//! 1. `<h1 data-auto="title">`
//! 2. `<title>` ending in the marketplace suffix (suffix removed)
//! 3. `<meta property="og:title">`
//!
//! A missing or unparseable price becomes the sentinel `0`; a missing or
//! implausible title is replaced by the URL-derived fallback.

use crate::scrape::ScrapeResult;
use crate::url::{derive_product_id, title_from_url};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};

/// Source tag reported for every successful scrape
pub const SOURCE_TAG: &str = "yamarket";

/// Failure reason when no positive price could be extracted
pub const PRICE_NOT_FOUND: &str = "Price not found or equal to 0";

/// Suffix the marketplace appends to every page `<title>`
const TITLE_SUFFIX: &str = " - Яндекс Маркет";

/// Shorter titles are treated as extraction noise
const MIN_TITLE_CHARS: usize = 5;

/// Appears in titles of the marketplace's bot-check and placeholder pages
const PLACEHOLDER_MARKER: &str = "marketfront";

static PRICE_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    [
        ("json price", r#""price":\s*"?(\d+)"?"#),
        ("price-value marker", r#"data-auto="price-value">\s*([\d\s]+)\s*₽"#),
        ("formattedPrice", r#""formattedPrice":"([\d\s]+)\s*₽""#),
    ]
    .into_iter()
    .map(|(name, pattern)| (name, Regex::new(pattern).expect("valid price pattern")))
    .collect()
});

type TitleStrategy = fn(&Html) -> Option<String>;

const TITLE_STRATEGIES: &[(&str, TitleStrategy)] = &[
    ("h1 title marker", title_from_heading),
    ("page title", title_from_title_element),
    ("og:title", title_from_og_meta),
];

/// Values extracted from a single product page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// Price in whole currency units, `0` when none was found
    pub price: i64,
    pub title: String,
    pub product_id: String,
}

impl Extraction {
    /// Applies the final decision rule: a positive price is a success, anything
    /// else is a failure regardless of how the title was obtained
    pub fn into_result(self, source_url: &str) -> ScrapeResult {
        if self.price > 0 {
            ScrapeResult::success(self.price, self.title, source_url, self.product_id)
        } else {
            ScrapeResult::failure(PRICE_NOT_FOUND)
        }
    }
}

/// Extracts price, title and product identifier from a product page
///
/// Never fails: misses are reported through the sentinel price and the
/// fallback title.
///
/// # Example
///
/// ```
/// use price_tracker::scrape::extract;
///
/// let html = r#"<script>{"price": "1234"}</script><h1 data-auto="title">Wireless Mouse</h1>"#;
/// let extraction = extract(html, "https://market.yandex.ru/card/wireless-mouse/42");
/// assert_eq!(extraction.price, 1234);
/// assert_eq!(extraction.title, "Wireless Mouse");
/// assert_eq!(extraction.product_id, "42");
/// ```
pub fn extract(html: &str, source_url: &str) -> Extraction {
    Extraction {
        price: extract_price(html),
        title: extract_title(html, source_url),
        product_id: derive_product_id(source_url),
    }
}

/// Extracts the price from page text, returning `0` when none is usable
///
/// The first pattern that matches decides: if its digits cannot be parsed the
/// result is `0` and later patterns are not consulted.
pub fn extract_price(html: &str) -> i64 {
    let Some((name, digits)) = PRICE_PATTERNS.iter().find_map(|(name, pattern)| {
        pattern
            .captures(html)
            .and_then(|caps| caps.get(1))
            .map(|m| (*name, m.as_str()))
    }) else {
        tracing::warn!("Price not found in page");
        return 0;
    };

    tracing::debug!("Price matched by {} strategy: {:?}", name, digits);

    let compact: String = digits.chars().filter(|c| !c.is_whitespace()).collect();
    match compact.parse::<i64>() {
        Ok(price) => price,
        Err(e) => {
            tracing::warn!("Could not parse price {:?}: {}", compact, e);
            0
        }
    }
}

/// Extracts a display title, falling back to one derived from the URL
pub fn extract_title(html: &str, source_url: &str) -> String {
    let document = Html::parse_document(html);

    let candidate = TITLE_STRATEGIES.iter().find_map(|(name, strategy)| {
        strategy(&document).map(|title| {
            tracing::debug!("Title matched by {} strategy", name);
            title
        })
    });

    match candidate.map(|title| collapse_whitespace(&title)) {
        Some(title) if is_plausible_title(&title) => title,
        Some(title) => {
            tracing::debug!("Discarding implausible title {:?}", title);
            title_from_url(source_url)
        }
        None => title_from_url(source_url),
    }
}

fn title_from_heading(document: &Html) -> Option<String> {
    let selector = Selector::parse(r#"h1[data-auto="title"]"#).ok()?;
    document
        .select(&selector)
        .next()
        .map(|element| element.text().collect())
}

fn title_from_title_element(document: &Html) -> Option<String> {
    let selector = Selector::parse("title").ok()?;
    let text: String = document.select(&selector).next()?.text().collect();
    text.trim().strip_suffix(TITLE_SUFFIX).map(str::to_string)
}

fn title_from_og_meta(document: &Html) -> Option<String> {
    let selector = Selector::parse(r#"meta[property="og:title"][content]"#).ok()?;
    document
        .select(&selector)
        .next()
        .and_then(|element| element.value().attr("content"))
        .filter(|content| !content.is_empty())
        .map(str::to_string)
}

/// Element text is already free of tags; only layout whitespace is left to fix
fn collapse_whitespace(title: &str) -> String {
    title.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_plausible_title(title: &str) -> bool {
    title.chars().count() >= MIN_TITLE_CHARS
        && !title.contains('@')
        && !title.contains(PLACEHOLDER_MARKER)
}

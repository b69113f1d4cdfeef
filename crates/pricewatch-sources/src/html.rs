//! Regex-based HTML field extraction shared by the catalog adapters.
//!
//! The catalogs are fixed and their markup is mined with anchored regexes
//! rather than a full DOM parse; each adapter keeps its own class selectors
//! so breakage stays isolated per site.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use regex::Regex;

/// Percent-encodes a search query for use in a URL query parameter.
pub(crate) fn encode_query(query: &str) -> String {
    utf8_percent_encode(query, NON_ALPHANUMERIC).to_string()
}

/// Splits `html` into per-item slices.
///
/// Every tag whose `class` attribute satisfies `is_item` starts a block; a
/// block runs until the next item tag (or end of input). Fields are then
/// mined from each slice independently.
pub(crate) fn item_blocks<'a>(html: &'a str, is_item: impl Fn(&str) -> bool) -> Vec<&'a str> {
    let class_re =
        Regex::new(r#"<[A-Za-z][^>]*\bclass\s*=\s*["']([^"']*)["']"#).expect("valid class regex");

    let starts: Vec<usize> = class_re
        .captures_iter(html)
        .filter_map(|cap| {
            let classes = cap.get(1)?.as_str();
            if is_item(classes) {
                cap.get(0).map(|m| m.start())
            } else {
                None
            }
        })
        .collect();

    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(html.len());
            &html[start..end]
        })
        .collect()
}

/// Finds the first `<a>` whose class attribute contains `class_token` and
/// returns its `(href, inner text)`. Inner markup is flattened: nested tags
/// are stripped and their text parts joined with single spaces.
pub(crate) fn anchor_with_class(fragment: &str, class_token: &str) -> Option<(String, String)> {
    let re = Regex::new(&format!(
        r#"(?is)(<a\s[^>]*class\s*=\s*["'][^"']*\b{}\b[^"']*["'][^>]*)>(.*?)</a>"#,
        regex::escape(class_token)
    ))
    .expect("valid anchor regex");

    let cap = re.captures(fragment)?;
    let open_tag = cap.get(1)?.as_str();
    let inner = cap.get(2)?.as_str();
    let href = attr(open_tag, "href")?;
    Some((href, element_text(inner)))
}

/// Inner text of the first `<{tag}>` element carrying `class_token`.
pub(crate) fn element_inner(fragment: &str, tag: &str, class_token: &str) -> Option<String> {
    let re = Regex::new(&format!(
        r#"(?is)<{tag}\s[^>]*class\s*=\s*["'][^"']*\b{token}\b[^"']*["'][^>]*>(.*?)</{tag}>"#,
        tag = regex::escape(tag),
        token = regex::escape(class_token)
    ))
    .expect("valid element regex");

    re.captures(fragment)
        .and_then(|cap| cap.get(1))
        .map(|m| element_text(m.as_str()))
}

/// Extracts an attribute value from a single tag.
pub(crate) fn attr(tag: &str, name: &str) -> Option<String> {
    let re = Regex::new(&format!(
        r#"(?i)\b{}\s*=\s*["']([^"']*)["']"#,
        regex::escape(name)
    ))
    .expect("valid attr regex");
    re.captures(tag)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().trim().to_owned())
}

/// Flattens a markup fragment to display text: tags become spaces, common
/// entities are decoded, whitespace is collapsed.
pub(crate) fn element_text(fragment: &str) -> String {
    let tag_re = Regex::new(r"(?s)<[^>]*>").expect("valid tag regex");
    let no_tags = tag_re.replace_all(fragment, " ");
    let decoded = decode_entities(&no_tags);
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// Resolves a possibly-relative `href` against the site base URL.
pub(crate) fn resolve_link(href: &str, base: &str) -> Option<String> {
    let base_url = reqwest::Url::parse(base).ok()?;
    base_url.join(href).ok().map(|url| url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_blocks_split_on_matching_class_token() {
        let html = r#"
            <div class="item first"><span>one</span></div>
            <div class="other">noise</div>
            <div class="item"><span>two</span></div>
        "#;
        let blocks = item_blocks(html, |classes| {
            classes.split_whitespace().any(|c| c == "item")
        });
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].contains("one"));
        assert!(blocks[1].contains("two"));
    }

    #[test]
    fn anchor_extracts_href_and_flattened_text() {
        let html = r#"<a class="product name" href="/p/1"><b>Картридж</b> <span>CM7</span></a>"#;
        let (href, text) = anchor_with_class(html, "name").unwrap();
        assert_eq!(href, "/p/1");
        assert_eq!(text, "Картридж CM7");
    }

    #[test]
    fn anchor_token_must_match_whole_class_word_boundary() {
        let html = r#"<a class="titlelink" href="/x">y</a>"#;
        assert!(anchor_with_class(html, "title").is_none());
    }

    #[test]
    fn element_inner_decodes_entities() {
        let html = r#"<div class="price">12&nbsp;500&nbsp;&#8381;</div>"#;
        let text = element_inner(html, "div", "price").unwrap();
        assert!(text.starts_with("12 500"));
    }

    #[test]
    fn resolve_link_joins_relative_paths() {
        assert_eq!(
            resolve_link("/catalog/item1/", "https://tehnikapremium.ru").as_deref(),
            Some("https://tehnikapremium.ru/catalog/item1/")
        );
    }

    #[test]
    fn resolve_link_keeps_absolute_urls() {
        assert_eq!(
            resolve_link("https://other.ru/p", "https://tehnikapremium.ru").as_deref(),
            Some("https://other.ru/p")
        );
    }

    #[test]
    fn encode_query_escapes_cyrillic_and_spaces() {
        let encoded = encode_query("Miele CM7");
        assert!(!encoded.contains(' '));
        assert!(encode_query("Найти").starts_with('%'));
    }
}

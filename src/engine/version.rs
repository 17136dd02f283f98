//! Cache busting for the entry document.
//!
//! Every publish gets a fresh tag `<label>-<unix seconds>`, appended as
//! `?v=<tag>` to stylesheet and script references in the entry document.
//! When the tag changes, browsers re-fetch the assets.

use regex::{Captures, Regex};
use std::sync::LazyLock;
use std::time::{SystemTime, UNIX_EPOCH};

/// Whitespace-preceded `href=` / `src=` attributes with a quoted value.
static ASSET_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)([ \t\r\n])(href|src)([ \t\r\n]*=[ \t\r\n]*)("[^"]*"|'[^']*')"#)
        .expect("asset attribute pattern is valid")
});

/// Current unix timestamp in seconds.
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Compose the cache tag for a publish.
pub fn cache_tag(label: &str, timestamp: u64) -> String {
    format!("{label}-{timestamp}")
}

/// Append `?v=<tag>` to every `href="*.css"` and `src="*.js"` value.
///
/// A single pass over the document: each occurrence is rewritten once and
/// every other byte is left as it was.
pub fn rewrite_asset_refs(content: &str, tag: &str) -> String {
    ASSET_ATTR
        .replace_all(content, |caps: &Captures| {
            let lead = &caps[1];
            let attr = &caps[2];
            let sep = &caps[3];
            let quoted = &caps[4];
            let (quote, value) = quoted.split_at(1);
            let value = &value[..value.len() - 1];

            if is_asset_ref(attr, value) {
                format!("{lead}{attr}{sep}{quote}{value}?v={tag}{quote}")
            } else {
                caps[0].to_string()
            }
        })
        .into_owned()
}

fn is_asset_ref(attr: &str, value: &str) -> bool {
    let value = value.to_ascii_lowercase();
    if attr.eq_ignore_ascii_case("href") {
        value.ends_with(".css")
    } else {
        value.ends_with(".js")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_tag_format() {
        assert_eq!(cache_tag("3", 1_700_000_000), "3-1700000000");
    }

    #[test]
    fn test_cache_tag_differs_across_seconds() {
        assert_ne!(cache_tag("3", 1_700_000_000), cache_tag("3", 1_700_000_001));
    }

    #[test]
    fn test_rewrite_stylesheet_and_script() {
        let html = r#"<head><link href="style.css"></head><body><script src="app.js"></script></body>"#;
        let out = rewrite_asset_refs(html, "3-1700000000");
        assert_eq!(
            out,
            r#"<head><link href="style.css?v=3-1700000000"></head><body><script src="app.js?v=3-1700000000"></script></body>"#
        );
    }

    #[test]
    fn test_rewrite_leaves_other_markup_untouched() {
        let html = "<a href=\"about.html\">About</a>\n<img src=\"logo.png\">\n<p>style.css app.js</p>";
        assert_eq!(rewrite_asset_refs(html, "1-2"), html);
    }

    #[test]
    fn test_rewrite_each_occurrence_once() {
        let html = r#"<link href="a.css"><link href="a.css">"#;
        let out = rewrite_asset_refs(html, "t");
        assert_eq!(out, r#"<link href="a.css?v=t"><link href="a.css?v=t">"#);
        assert_eq!(out.matches("?v=").count(), 2);
    }

    #[test]
    fn test_rewrite_does_not_mix_attribute_kinds() {
        // A script referenced through href and a stylesheet through src are left alone.
        let html = r#"<link href="x.js"><script src="y.css"></script>"#;
        assert_eq!(rewrite_asset_refs(html, "t"), html);
    }

    #[test]
    fn test_rewrite_single_quotes_and_spacing() {
        let html = "<link rel='stylesheet' href = 'css/main.css'>";
        assert_eq!(
            rewrite_asset_refs(html, "v1-9"),
            "<link rel='stylesheet' href = 'css/main.css?v=v1-9'>"
        );
    }

    #[test]
    fn test_rewrite_nested_and_absolute_refs() {
        let html = r#"<script src="/js/vendor/lib.js"></script><link href="https://cdn.example.com/x.css">"#;
        let out = rewrite_asset_refs(html, "2-5");
        assert!(out.contains(r#"src="/js/vendor/lib.js?v=2-5""#));
        assert!(out.contains(r#"href="https://cdn.example.com/x.css?v=2-5""#));
    }

    #[test]
    fn test_rewrite_skips_existing_query() {
        let html = r#"<link href="a.css?v=old">"#;
        assert_eq!(rewrite_asset_refs(html, "new"), html);
    }

    #[test]
    fn test_rewrite_does_not_touch_data_attributes() {
        let html = r#"<div data-src="x.js"></div>"#;
        assert_eq!(rewrite_asset_refs(html, "t"), html);
    }
}

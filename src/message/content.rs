use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use ammonia::Builder;
use regex::Regex;

/// Excerpts keep this many characters minus one before the ellipsis.
pub const EXCERPT_LENGTH: usize = 100;

const ALLOWED_TAGS: [&str; 12] = [
    "a",
    "b",
    "blockquote",
    "br",
    "em",
    "i",
    "li",
    "ol",
    "p",
    "strong",
    "u",
    "ul",
];

static SANITIZER: LazyLock<Builder<'static>> = LazyLock::new(|| {
    let mut b = Builder::default();
    b.tags(HashSet::from(ALLOWED_TAGS))
        .tag_attributes(HashMap::from([("a", HashSet::from(["href"]))]))
        .generic_attributes(HashSet::new());
    b
});

static SCRIPTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<(script|style)\b[^>]*>.*?</(script|style)\s*>").expect("valid regex")
});
static BLOCKS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)</?(p|div|br|li|ul|ol|blockquote|h[1-6]|pre|table|tr|td|th)\b[^>]*>")
        .expect("valid regex")
});
static TAGS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));
static SPACES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Reduces user supplied markup to the allow-listed formatting tags.
pub fn sanitize(html: &str) -> String {
    SANITIZER.clean(html).to_string()
}

/// Visible text of `html` with whitespace collapsed.
pub fn plain_text(html: &str) -> String {
    let text = SCRIPTS.replace_all(html, "");
    let text = BLOCKS.replace_all(&text, " ");
    let text = TAGS.replace_all(&text, "");
    let text = html_escape::decode_html_entities(&text);

    SPACES.replace_all(&text, " ").trim().to_owned()
}

/// Short plain text preview of a message, always terminated by ` …`.
pub fn excerpt(html: &str) -> String {
    let mut s = plain_text(html)
        .chars()
        .take(EXCERPT_LENGTH - 1)
        .collect::<String>();
    s.truncate(s.trim_end().len());
    s.push_str(" …");
    s
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn should_keep_allowed_tags() {
        assert_eq!(sanitize("<b>Hi</b> <em>there</em>"), "<b>Hi</b> <em>there</em>");
    }

    #[test]
    fn should_strip_scripts_and_handlers() {
        let clean = sanitize(r#"<p onclick="steal()">Hi<script>alert(1)</script></p>"#);

        assert_eq!(clean, "<p>Hi</p>");
    }

    #[test]
    fn should_drop_unsafe_links() {
        let clean = sanitize(r#"<a href="javascript:alert(1)">x</a>"#);

        assert!(!clean.contains("javascript"));
        assert!(clean.contains('x'));
    }

    #[test]
    fn should_unwrap_unknown_tags() {
        assert_eq!(sanitize("<marquee>Hi</marquee>"), "Hi");
    }

    #[test]
    fn should_extract_plain_text() {
        assert_eq!(plain_text("<p>Hi</p><p>there</p>"), "Hi there");
        assert_eq!(plain_text("a&nbsp;&amp;&nbsp;b"), "a & b");
        assert_eq!(plain_text("<style>p{}</style><b>x</b>"), "x");
    }

    #[test]
    fn should_decode_escaped_text() {
        assert_eq!(excerpt(&sanitize("1 < 2 & 3 > 0")), "1 < 2 & 3 > 0 …");
        assert_eq!(excerpt(&sanitize("1 < 2")), "1 < 2 …");
        assert_eq!(plain_text("caf&#233; &#x263A; &quot;x&quot; &lt;b&gt;"), "café ☺ \"x\" <b>");
    }

    #[test]
    fn should_not_split_entities_when_cutting() {
        let html = sanitize(&format!("{}<>", "a".repeat(97)));

        assert_eq!(excerpt(&html), format!("{}<> …", "a".repeat(97)));
    }

    #[test]
    fn should_treat_markup_only_as_empty() {
        for html in ["", "   ", "<p></p>", "<br><br/>", "<b> </b>", "&nbsp;", "<script>x</script>"] {
            assert!(plain_text(html).is_empty(), "{html}");
        }
    }

    #[test]
    fn should_build_short_excerpt() {
        assert_eq!(excerpt("<b>Hi</b>"), "Hi …");
    }

    #[test]
    fn should_cut_long_excerpt() {
        let long = "a".repeat(500);

        let e = excerpt(&long);

        assert_eq!(e.chars().count(), EXCERPT_LENGTH + 1);
        assert!(e.ends_with("a …"));
    }

    #[test]
    fn should_trim_before_ellipsis() {
        let text = format!("{} tail", "a".repeat(98));

        assert_eq!(excerpt(&text), format!("{} …", "a".repeat(98)));
    }

    #[test]
    fn should_count_chars_not_bytes() {
        let e = excerpt(&"ă".repeat(200));

        assert_eq!(e.chars().count(), EXCERPT_LENGTH + 1);
    }
}

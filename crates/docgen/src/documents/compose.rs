//! Merges resolved HTML fragments into one printable document. The first
//! non-empty fragment keeps its structure; later fragments contribute body
//! content only. Styles are pulled out of every fragment, normalized for
//! print legibility, and re-injected as one consolidated block.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

static STYLE_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<style[^>]*>(.*?)</style>").expect("style pattern compiles"));

static LOW_CONTRAST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)color\s*:\s*#(?:ccc|999)\b").expect("contrast pattern compiles")
});

static HEAD_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<head[^>]*>.*?</head>").expect("head pattern compiles"));

static HEAD_OPEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<head[^>]*>").expect("head open pattern compiles"));

static HTML_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</?html[^>]*>").expect("html tag pattern compiles"));

static BODY_OPEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<body[^>]*>").expect("body open pattern compiles"));

static BODY_CLOSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</body>").expect("body close pattern compiles"));

/// A merged document plus the stylesheet extracted from its fragments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposedDocument {
    pub html: String,
    pub styles: String,
}

impl ComposedDocument {
    pub fn is_empty(&self) -> bool {
        self.html.is_empty() && self.styles.is_empty()
    }
}

/// Combine fragments into one document. Zero non-empty fragments yield an
/// empty result rather than an empty document shell, and malformed input
/// degrades the same way instead of raising.
pub fn compose(fragments: &[String]) -> ComposedDocument {
    let non_empty: Vec<&String> = fragments
        .iter()
        .filter(|fragment| !fragment.trim().is_empty())
        .collect();

    let Some((base, rest)) = non_empty.split_first() else {
        return ComposedDocument::default();
    };

    let styles = extract_styles(&non_empty);

    let mut html = (*base).clone();
    for fragment in rest {
        let body = body_content(fragment);
        if body.is_empty() {
            continue;
        }
        html = append_to_body(&html, &body);
    }

    // All original style blocks go away; the consolidated block replaces
    // them in <head>.
    html = STYLE_BLOCK_RE.replace_all(&html, "").into_owned();
    if !styles.is_empty() {
        html = inject_stylesheet(&html, &styles);
    }

    ComposedDocument { html, styles }
}

/// `<style>` contents in fragment order, with low-contrast color rules
/// rewritten so gray proof text survives printing. A block repeated across
/// fragments is emitted once.
fn extract_styles(fragments: &[&String]) -> String {
    let mut seen = HashSet::new();
    let mut blocks = Vec::new();
    for fragment in fragments {
        for captures in STYLE_BLOCK_RE.captures_iter(fragment) {
            let css = captures.get(1).map(|m| m.as_str().trim()).unwrap_or("");
            if css.is_empty() {
                continue;
            }
            let css = LOW_CONTRAST_RE
                .replace_all(css, "color:#000 !important")
                .into_owned();
            if seen.insert(css.clone()) {
                blocks.push(css);
            }
        }
    }
    blocks.join("\n\n")
}

/// Remove every `<style>` block, leaving markup only.
pub(crate) fn strip_style_blocks(html: &str) -> String {
    STYLE_BLOCK_RE.replace_all(html, "").into_owned()
}

/// Strip document scaffolding from a fragment, leaving body inner content
/// only.
pub(crate) fn body_content(fragment: &str) -> String {
    let stripped = STYLE_BLOCK_RE.replace_all(fragment, "");
    let stripped = HEAD_BLOCK_RE.replace_all(&stripped, "");
    let stripped = HTML_TAG_RE.replace_all(&stripped, "");
    let stripped = BODY_OPEN_RE.replace_all(&stripped, "");
    let stripped = BODY_CLOSE_RE.replace_all(&stripped, "");
    stripped.trim().to_string()
}

fn append_to_body(html: &str, content: &str) -> String {
    match BODY_CLOSE_RE.find(html) {
        Some(close) => {
            let mut combined = String::with_capacity(html.len() + content.len() + 1);
            combined.push_str(&html[..close.start()]);
            combined.push_str(content);
            combined.push_str(&html[close.start()..]);
            combined
        }
        None => format!("{html}{content}"),
    }
}

/// Place the consolidated stylesheet inside `<head>`, synthesizing one
/// before `<body>` (or at the very start) when the base fragment has none.
fn inject_stylesheet(html: &str, styles: &str) -> String {
    let block = format!("<style>\n{styles}\n</style>");

    if let Some(head_open) = HEAD_OPEN_RE.find(html) {
        let mut combined = String::with_capacity(html.len() + block.len());
        combined.push_str(&html[..head_open.end()]);
        combined.push_str(&block);
        combined.push_str(&html[head_open.end()..]);
        return combined;
    }

    let head = format!("<head>{block}</head>");
    if let Some(body_open) = BODY_OPEN_RE.find(html) {
        let mut combined = String::with_capacity(html.len() + head.len());
        combined.push_str(&html[..body_open.start()]);
        combined.push_str(&head);
        combined.push_str(&html[body_open.start()..]);
        return combined;
    }

    format!("{head}{html}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_empty_document_not_a_shell() {
        assert!(compose(&[]).is_empty());
        assert!(compose(&[String::new(), "   ".to_string()]).is_empty());
    }

    #[test]
    fn two_fragments_merge_bodies_and_styles() {
        let fragments = vec![
            "<html><head><style>p{color:#ccc}</style></head><body>A</body></html>".to_string(),
            "<html><body>B</body></html>".to_string(),
        ];

        let composed = compose(&fragments);

        let a = composed.html.find('A').expect("base content kept");
        let b = composed.html.find('B').expect("secondary content appended");
        assert!(a < b, "fragment order preserved");
        assert!(composed.styles.contains("color:#000 !important"));
        assert!(!composed.styles.contains("#ccc"));

        // One consolidated block in <head>, no stray style blocks.
        assert_eq!(composed.html.matches("<style>").count(), 1);
        let head_end = composed.html.find("</head>").expect("head kept");
        let style_at = composed.html.find("<style>").expect("style injected");
        assert!(style_at < head_end);
    }

    #[test]
    fn secondary_fragment_scaffolding_is_stripped() {
        let fragments = vec![
            "<html><body>First</body></html>".to_string(),
            "<html><head><title>x</title></head><body><p>Second</p></body></html>".to_string(),
        ];

        let composed = compose(&fragments);
        assert!(composed.html.contains("<p>Second</p>"));
        assert!(!composed.html.contains("<title>"));
        assert_eq!(composed.html.matches("<body>").count(), 1);
        assert_eq!(composed.html.matches("</html>").count(), 1);
    }

    #[test]
    fn head_is_synthesized_when_base_has_none() {
        let fragments = vec![
            "<body><style>td{color:#999}</style>Content</body>".to_string(),
        ];

        let composed = compose(&fragments);
        assert!(composed.html.starts_with("<head><style>"));
        assert!(composed.styles.contains("color:#000 !important"));
    }

    #[test]
    fn bare_fragment_without_body_gets_stylesheet_prepended() {
        let fragments = vec!["<style>i{color:#ccc}</style><p>Note</p>".to_string()];

        let composed = compose(&fragments);
        assert!(composed.html.starts_with("<head><style>"));
        assert!(composed.html.contains("<p>Note</p>"));
    }

    #[test]
    fn styles_concatenate_in_fragment_order() {
        let fragments = vec![
            "<body><style>.one{margin:0}</style>A</body>".to_string(),
            "<body><style>.two{padding:0}</style>B</body>".to_string(),
        ];

        let composed = compose(&fragments);
        let one = composed.styles.find(".one").expect("first block present");
        let two = composed.styles.find(".two").expect("second block present");
        assert!(one < two);
        assert!(composed.styles.contains("\n\n"));
    }

    #[test]
    fn repeated_style_blocks_collapse_to_one() {
        let shared = "<style>.shared{font-size:12px}</style>";
        let fragments = vec![
            format!("<body>{shared}A</body>"),
            format!("<body>{shared}<style>.extra{{margin:0}}</style>B</body>"),
        ];

        let composed = compose(&fragments);
        assert_eq!(composed.styles.matches(".shared").count(), 1);
        assert!(composed.styles.contains(".extra"));
    }
}

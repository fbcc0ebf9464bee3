//! Output shapes: live preview (body and styles apart), PDF-ready HTML with
//! a print stylesheet, and the final blanking pass that removes every token
//! no resolver claimed.

use std::sync::LazyLock;

use regex::Regex;

use super::compose::{self, ComposedDocument};

static UNRESOLVED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{[^{}]*\}\}").expect("blanking pattern compiles"));

/// Print stylesheet layered beneath the extracted fragment styles, so
/// fragment-specific rules still take precedence.
const PRINT_CSS: &str = "\
@page { size: letter; margin: 0.5in; }
body { font-family: Arial, Helvetica, sans-serif; font-size: 12px; }
h1, h2, h3 { font-size: 14px; }
table { width: 100%; border-collapse: collapse; }
.breakhere { page-break-before: always; }
p, tr { orphans: 3; widows: 3; }";

/// Body HTML and stylesheet kept separate so a UI layer can inject styles
/// into an isolated preview surface without re-parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preview {
    pub html: String,
    pub styles: String,
}

pub fn preview(document: &ComposedDocument) -> Preview {
    Preview {
        html: compose::strip_style_blocks(&document.html),
        styles: document.styles.clone(),
    }
}

/// Full document shell around the composed body, print CSS first, fragment
/// styles second. An empty composition stays empty.
pub fn pdf_document(document: &ComposedDocument) -> String {
    if document.html.trim().is_empty() {
        return String::new();
    }

    let body = compose::body_content(&document.html);
    let mut styles = String::from(PRINT_CSS);
    if !document.styles.is_empty() {
        styles.push_str("\n\n");
        styles.push_str(&document.styles);
    }

    format!(
        "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><style>\n{styles}\n</style></head><body>{body}</body></html>"
    )
}

/// Remove every remaining `{{...}}` token. Runs exactly once per pipeline
/// invocation, after composition.
pub fn blank_unresolved(html: &str) -> String {
    UNRESOLVED_RE.replace_all(html, "").into_owned()
}

//! Output sanitizer for serialized AMP markup
//!
//! The converter itself only projects allowlisted attributes; this module
//! is the final safety pass applied to the transformed body before usage
//! is recorded and the result is serialized out. The primary threat is
//! untrusted HTML authored
//! in the CMS editor: script/style blocks, inline event handlers, and
//! `javascript:`/`data:` URLs that survived the media-element rewrite
//! because they sat outside the four handled families.
//!
//! # Behavior
//!
//! - Dangerous elements are removed along with their children.
//! - Event-handler attributes (`on*`) are stripped from every element.
//! - `href`/`src`/`poster` attributes carrying a dangerous URL scheme are
//!   stripped.
//! - Everything else - including `amp-*` custom elements and their
//!   projected attributes - passes through untouched.
//!
//! The pass is idempotent: sanitizing already-sanitized markup returns it
//! unchanged.

use markup5ever_rcdom::{Handle, NodeData};

use crate::dom;
use crate::error::ConversionError;
use crate::parser::parse_html;

/// Elements removed entirely, children included
const DANGEROUS_ELEMENTS: &[&str] = &[
    "script",   // JavaScript execution
    "style",    // CSS injection (can contain expressions)
    "noscript", // Alternative content, not wanted in AMP output
    "object",   // Can execute plugins
    "embed",    // Can execute plugins
    "applet",   // Legacy Java applets
    "base",     // Can change base URL for all relative URLs
];

/// URL schemes stripped from href/src/poster attributes
const DANGEROUS_URL_SCHEMES: &[&str] = &[
    "javascript:", // JavaScript execution
    "data:",       // Can contain executable content
    "vbscript:",   // VBScript execution (legacy IE)
    "file:",       // Local file access
];

/// Attributes checked for dangerous URL schemes
const URL_ATTRIBUTES: &[&str] = &["href", "src", "poster"];

/// Sanitize an HTML string
///
/// Parses the markup, removes unsafe elements and attributes, and
/// serializes the body children back out. Empty input sanitizes to the
/// empty string.
///
/// # Errors
///
/// Returns `ConversionError::SerializeError` if writing the cleaned tree
/// fails.
///
/// # Examples
///
/// ```rust
/// use amp_converter::sanitizer::sanitize;
///
/// let clean = sanitize("<p>ok</p><script>alert(1)</script>").expect("sanitize failed");
/// assert_eq!(clean, "<p>ok</p>");
/// ```
pub fn sanitize(html: &str) -> Result<String, ConversionError> {
    let dom = parse_html(html)?;
    let body = dom::find_body(&dom).ok_or_else(|| {
        ConversionError::InternalError("parsed document has no body".to_string())
    })?;
    sanitize_tree(&body);
    dom::inner_html(&body)
}

/// Sanitize a parsed subtree in place
///
/// Same pass as [`sanitize`], applied to an already-parsed tree so a
/// caller holding one can clean it before serializing. Dangerous elements
/// are removed together with everything nested inside them; the root
/// node's own attributes are not inspected.
pub fn sanitize_tree(root: &Handle) {
    clean_subtree(root);
}

/// True when a URL uses a scheme that must not reach the output
fn is_dangerous_url(url: &str) -> bool {
    let url_lower = url.trim().to_lowercase();
    DANGEROUS_URL_SCHEMES
        .iter()
        .any(|scheme| url_lower.starts_with(scheme))
}

fn is_dangerous_element(node: &Handle) -> bool {
    matches!(dom::tag_name(node), Some(tag) if DANGEROUS_ELEMENTS.contains(&tag))
}

fn clean_subtree(node: &Handle) {
    node.children
        .borrow_mut()
        .retain(|child| !is_dangerous_element(child));

    for child in node.children.borrow().iter() {
        clean_attributes(child);
        clean_subtree(child);
    }
}

fn clean_attributes(node: &Handle) {
    if let NodeData::Element { ref attrs, .. } = node.data {
        attrs.borrow_mut().retain(|attr| {
            let name = attr.name.local.as_ref();
            // Event handlers allow JavaScript execution when events fire
            if name.starts_with("on") {
                return false;
            }
            if URL_ATTRIBUTES.contains(&name) && is_dangerous_url(&attr.value) {
                return false;
            }
            true
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_script_removed_with_content() {
        let clean = sanitize("<p>before</p><script>alert('xss')</script><p>after</p>")
            .expect("sanitize");
        assert!(!clean.contains("script"));
        assert!(!clean.contains("alert"));
        assert!(clean.contains("<p>before</p>"));
        assert!(clean.contains("<p>after</p>"));
    }

    #[test]
    fn test_event_handlers_stripped() {
        let clean = sanitize("<p onclick=\"alert(1)\" onmouseover=\"x()\">Click me</p>")
            .expect("sanitize");
        assert!(!clean.contains("onclick"));
        assert!(!clean.contains("onmouseover"));
        assert!(clean.contains("Click me"));
    }

    #[test]
    fn test_dangerous_url_schemes_stripped() {
        let clean = sanitize("<a href=\"javascript:alert(1)\">link</a>").expect("sanitize");
        assert!(!clean.contains("javascript:"));
        assert!(clean.contains("link"));

        let clean = sanitize("<a href=\"JavaScript:alert(1)\">link</a>").expect("sanitize");
        assert!(!clean.contains("avascript:"), "scheme check is case-insensitive");
    }

    #[test]
    fn test_safe_urls_kept() {
        let clean = sanitize("<a href=\"https://example.com\">link</a>").expect("sanitize");
        assert!(clean.contains("href=\"https://example.com\""));

        let clean = sanitize("<a href=\"/relative/path\">link</a>").expect("sanitize");
        assert!(clean.contains("href=\"/relative/path\""));
    }

    #[test]
    fn test_amp_elements_untouched() {
        let html = "<amp-img src=\"a.png\" width=\"600\" height=\"400\" layout=\"responsive\"></amp-img>";
        let clean = sanitize(html).expect("sanitize");
        assert!(clean.contains("<amp-img"));
        assert!(clean.contains("src=\"a.png\""));
        assert!(clean.contains("layout=\"responsive\""));
    }

    #[test]
    fn test_fallback_block_untouched() {
        let html = "<amp-video src=\"v.mp4\" controls=\"\"><div fallback=\"\"><p>Unsupported</p></div></amp-video>";
        let clean = sanitize(html).expect("sanitize");
        assert!(clean.contains("fallback"));
        assert!(clean.contains("Unsupported"));
    }

    #[test]
    fn test_escaped_script_text_stays_escaped() {
        let clean = sanitize("<p>&lt;script&gt;</p>").expect("sanitize");
        assert_eq!(sanitize(&clean).expect("sanitize"), clean);
        assert!(!clean.contains("<script"));
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        assert_eq!(sanitize("").expect("sanitize"), "");
    }

    #[test]
    fn test_idempotent_on_sanitized_output() {
        let dirty = "<div onclick=\"x()\"><p>text</p><script>bad()</script>\
                     <a href=\"javascript:y()\">link</a></div>";
        let once = sanitize(dirty).expect("sanitize");
        let twice = sanitize(&once).expect("sanitize");
        assert_eq!(once, twice);
    }

    proptest! {
        // Property: sanitize(sanitize(x)) == sanitize(x)
        #[test]
        fn prop_sanitize_idempotent(
            text in "[a-zA-Z0-9 ]{1,40}",
            handler in "[a-z]{1,8}",
            use_script in prop::bool::ANY,
        ) {
            let mut html = format!("<div onfocus=\"{}()\"><p>{}</p>", handler, text);
            if use_script {
                html.push_str("<script>payload()</script>");
            }
            html.push_str("</div>");

            let once = sanitize(&html).expect("first pass");
            if once.is_empty() {
                // Nothing survived; nothing further to check
                return Ok(());
            }
            let twice = sanitize(&once).expect("second pass");
            prop_assert_eq!(once, twice);
        }

        // Property: dangerous schemes never survive, regardless of case
        #[test]
        fn prop_dangerous_schemes_rejected(
            payload in "[A-Za-z0-9_/?=&.-]{0,32}",
            uppercase in prop::bool::ANY,
        ) {
            for scheme in DANGEROUS_URL_SCHEMES {
                let scheme_variant = if uppercase {
                    scheme.to_uppercase()
                } else {
                    scheme.to_string()
                };
                let url = format!("{}{}", scheme_variant, payload);
                prop_assert!(
                    is_dangerous_url(&url),
                    "scheme should be detected regardless of case: {}",
                    url
                );
            }
        }
    }
}

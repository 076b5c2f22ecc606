//! HTML5 parser using html5ever
//!
//! This module provides HTML parsing functionality that handles malformed
//! markup gracefully according to the HTML5 specification.
//!
//! # Overview
//!
//! The parser uses Mozilla's html5ever library, which implements the WHATWG HTML5
//! parsing algorithm. This ensures that even malformed HTML is parsed consistently
//! and predictably, following the same rules as modern web browsers. Post and page
//! bodies coming out of a CMS are frequently fragments (no DOCTYPE, no `<html>`
//! wrapper); html5ever wraps them in a full document, and the conversion pipeline
//! serializes only the body children back out.
//!
//! # Configuration
//!
//! The parser uses default html5ever configuration:
//! - **Scripting flag**: left at the tree builder's default
//!   (`scripting_enabled: true`), so `<noscript>` content is parsed as
//!   text; no script is ever executed either way
//! - **Error Handling**: Errors are collected but parsing continues
//! - **Tree Builder**: Uses RcDom for reference-counted DOM nodes

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::RcDom;

use crate::error::ConversionError;

/// Parse an HTML string into a DOM tree
///
/// # Arguments
///
/// * `html` - HTML content, typically a post or page body fragment
///
/// # Returns
///
/// Returns `Ok(RcDom)` containing the parsed DOM tree. HTML5 parsing
/// recovers from any malformed input, so the current implementation never
/// errors; the `Result` is the shared error surface of the conversion
/// pipeline. Empty input parses to a document with an empty body.
///
/// # Examples
///
/// ```rust
/// use amp_converter::parser::parse_html;
///
/// // Parse a well-formed fragment
/// let dom = parse_html("<p>Hello</p>").expect("Failed to parse HTML");
///
/// // Parse malformed HTML (missing closing tags)
/// let dom = parse_html("<div><p>Hello").expect("Parser handles malformed HTML");
/// # let _ = dom;
/// ```
pub fn parse_html(html: &str) -> Result<RcDom, ConversionError> {
    // Parse directly from the UTF-8 string sink to avoid
    // `std::io::Read`/Cursor overhead in the hot path.
    let dom = parse_document(RcDom::default(), Default::default()).one(html);

    Ok(dom)
}

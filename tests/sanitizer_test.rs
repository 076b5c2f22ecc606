//! Sanitizer boundary tests
//!
//! The sanitizer is the final pass over serialized conversion output; it
//! must strip unsafe markup while leaving valid AMP custom elements and
//! their required attributes alone, and it must be idempotent so the
//! boundary can be applied defensively more than once.

use amp_converter::converter::AmpConverter;
use amp_converter::sanitize;

#[test]
fn test_script_and_style_removed() {
    let html = r#"<p>Before</p>
        <script>alert('xss')</script>
        <style>body { display: none; }</style>
        <p>After</p>"#;

    let clean = sanitize(html).expect("sanitize failed");

    assert!(!clean.contains("<script"));
    assert!(!clean.contains("<style"));
    assert!(!clean.contains("alert"));
    assert!(!clean.contains("display: none"));
    assert!(clean.contains("Before"));
    assert!(clean.contains("After"));
}

#[test]
fn test_event_handlers_removed_everywhere() {
    let html = r#"<div onload="a()"><p onclick="b()">Click</p>
        <amp-img src="x.png" onerror="c()"></amp-img></div>"#;

    let clean = sanitize(html).expect("sanitize failed");

    assert!(!clean.contains("onload"));
    assert!(!clean.contains("onclick"));
    assert!(!clean.contains("onerror"));
    // The element itself survives, only the handler goes
    assert!(clean.contains("<amp-img src=\"x.png\">"));
    assert!(clean.contains("Click"));
}

#[test]
fn test_javascript_urls_removed() {
    let clean = sanitize(r#"<a href="javascript:alert(1)">bad</a><a href="https://ok.example">good</a>"#)
        .expect("sanitize failed");

    assert!(!clean.contains("javascript:"));
    assert!(clean.contains("https://ok.example"));
}

#[test]
fn test_amp_output_passes_through_unchanged() {
    let converter = AmpConverter::new();
    let result = converter
        .convert(
            "<img src=\"a.png\" width=\"800\">\
             <iframe src=\"https://www.youtube.com/embed/rfscVS0vtbw\"></iframe>\
             <video src=\"v.mp4\"></video>",
        )
        .expect("conversion failed");

    // Conversion output is already sanitized; another pass is a no-op.
    let again = sanitize(&result.html).expect("sanitize failed");
    assert_eq!(again, result.html);
}

#[test]
fn test_sanitize_is_idempotent() {
    let dirty = r#"<div onclick="x()"><p>keep me</p>
        <script>drop()</script>
        <a href="vbscript:y()">link</a></div>"#;

    let once = sanitize(dirty).expect("first pass failed");
    let twice = sanitize(&once).expect("second pass failed");

    assert_eq!(once, twice);
    assert!(once.contains("keep me"));
}

#[test]
fn test_required_amp_attributes_survive() {
    let html = "<amp-video src=\"clip.mp4\" layout=\"responsive\" width=\"600\" height=\"400\" controls=\"\">\
                <div fallback=\"\"><p>Your browser does not support the video element.</p></div>\
                </amp-video>";

    let clean = sanitize(html).expect("sanitize failed");

    assert!(clean.contains("src=\"clip.mp4\""));
    assert!(clean.contains("layout=\"responsive\""));
    assert!(clean.contains("width=\"600\""));
    assert!(clean.contains("height=\"400\""));
    assert!(clean.contains("controls=\"\""));
    assert!(clean.contains("<div fallback=\"\">"));
}

//! AMP Converter - HTML to AMP media element conversion library
//!
//! This library rewrites rich-content HTML from a blogging CMS into the
//! markup subset required by the AMP (Accelerated Mobile Pages) rendering
//! contract. Native media elements are replaced in place by their AMP
//! custom element counterparts:
//!
//! - `<img>` becomes `amp-img`, or `amp-anim` for animated images
//! - `<iframe>` becomes `amp-youtube` when a YouTube embed is detected,
//!   otherwise a sandboxed `amp-iframe`
//! - `<audio>` becomes `amp-audio` with localized fallback content
//! - `<video>` becomes `amp-video` with localized fallback content
//!
//! Alongside the transformed markup, each conversion reports which AMP
//! element kinds were emitted so the caller can load only the runtime
//! scripts the page needs.
//!
//! # Architecture
//!
//! The library is structured into several modules:
//! - `parser`: HTML5 parsing using html5ever
//! - `dom`: tree primitives over the rcdom document model
//! - `rules`: per-kind target descriptors and attribute allowlists
//! - `converter`: element classification and the per-family rewrites
//! - `registry`: per-run record of emitted AMP element kinds
//! - `youtube`: YouTube embed URL detection
//! - `translate`: translation lookup for fallback content
//! - `sanitizer`: final safety pass over the output tree
//!
//! # Example
//!
//! ```rust
//! use amp_converter::{AmpConverter, AmpKind};
//!
//! let converter = AmpConverter::new();
//! let result = converter
//!     .convert("<iframe src=\"https://www.youtube.com/embed/rfscVS0vtbw\"></iframe>")
//!     .expect("conversion failed");
//!
//! assert!(result.html.contains("data-videoid=\"rfscVS0vtbw\""));
//! assert!(result.elements.is_used(AmpKind::Youtube));
//! ```

// Module declarations
pub mod converter;
pub mod dom;
pub mod error;
pub mod parser;
pub mod registry;
pub mod rules;
pub mod sanitizer;
pub mod translate;
pub mod youtube;

// Re-export main types for convenience
pub use converter::{AmpConverter, AmpResult, ConversionOptions};
pub use error::ConversionError;
pub use parser::parse_html;
pub use registry::ElementUsage;
pub use rules::AmpKind;
pub use sanitizer::sanitize;
pub use translate::{DefaultTranslations, Translations};

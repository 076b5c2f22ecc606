//! AMP converter - transforms native media elements to AMP custom elements
//!
//! This module provides the core conversion logic for rewriting a post or
//! page body into AMP-valid markup. The AMP rendering contract forbids the
//! native `<img>`, `<iframe>`, `<audio>` and `<video>` tags; each must be
//! replaced by the corresponding AMP custom element carrying only the
//! attributes the AMP runtime accepts.
//!
//! # Conversion Strategy
//!
//! The converter runs a single pass over one parsed document:
//!
//! 1. **Classification**: collect the four source element families
//!    (image, iframe, audio, video) in document order.
//! 2. **Per-family rewrite**: each family has its own rule producing the
//!    replacement element - `amp-img`/`amp-anim` for images,
//!    `amp-youtube`/`amp-iframe` for iframes, `amp-audio` and `amp-video`
//!    for the media tags. Every handled source element is replaced by
//!    exactly one target element in place.
//! 3. **Attribute projection**: a fixed allowlist per target kind decides
//!    which source attributes are copied; everything else is dropped, and
//!    empty values are never written.
//! 4. **Sanitization**: the output sanitizer runs over the transformed
//!    tree, removing unsafe elements and attributes. A dangerous ancestor
//!    takes any converted descendants with it.
//! 5. **Registry + serialization**: the sanitized tree is scanned for the
//!    six AMP element kinds to build the [`ElementUsage`] registry, then
//!    the body children are serialized back to HTML. Scanning after
//!    sanitization keeps each flag true exactly when an element of that
//!    kind exists in the returned markup.
//!
//! The whole model lives for one invocation; nothing is shared across
//! calls. All work is synchronous - no element rewrite performs I/O, and
//! the families touch disjoint nodes of the single shared tree.
//!
//! # Examples
//!
//! ```rust
//! use amp_converter::converter::AmpConverter;
//! use amp_converter::rules::AmpKind;
//!
//! let converter = AmpConverter::new();
//! let result = converter
//!     .convert("<img src=\"photo.jpg\" width=\"800\" height=\"600\">")
//!     .expect("conversion failed");
//!
//! assert!(result.html.contains("<amp-img"));
//! assert!(result.elements.is_used(AmpKind::Img));
//! ```

use markup5ever_rcdom::Handle;

use crate::dom;
use crate::error::ConversionError;
use crate::parser::parse_html;
use crate::registry::ElementUsage;
use crate::rules::AmpKind;
use crate::sanitizer::sanitize_tree;
use crate::translate::{DefaultTranslations, Translations};
use crate::youtube;

/// Width substituted when an iframe or video declares none (or a percentage)
pub const DEFAULT_WIDTH: u32 = 600;

/// Height substituted when an iframe or video declares none (or a percentage)
pub const DEFAULT_HEIGHT: u32 = 400;

/// Declared widths below this render with `layout="fixed"`
const FIXED_LAYOUT_MAX_WIDTH: f64 = 300.0;

/// Sandbox applied to `amp-iframe` elements that declare none
const DEFAULT_SANDBOX: &str = "allow-scripts allow-same-origin allow-popups";

/// Conversion options
#[derive(Debug, Clone)]
pub struct ConversionOptions {
    /// Width substituted by the dimension normalizer
    pub default_width: u32,
    /// Height substituted by the dimension normalizer
    pub default_height: u32,
    /// Fail conversion when an audio/video element has no playable source
    /// instead of emitting an element without `src`
    pub strict_media_sources: bool,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            default_width: DEFAULT_WIDTH,
            default_height: DEFAULT_HEIGHT,
            strict_media_sources: false,
        }
    }
}

/// Result of one conversion run
#[derive(Debug)]
pub struct AmpResult {
    /// The transformed and sanitized body markup
    pub html: String,
    /// Which AMP element kinds were emitted, for runtime script loading
    pub elements: ElementUsage,
}

/// Main AMP converter
///
/// Rewrites the four native media element families of a post body into
/// AMP custom elements and reports which kinds were emitted. Each call to
/// [`convert`](AmpConverter::convert) is independent; the converter holds
/// only configuration and the translation backend used for fallback
/// content.
pub struct AmpConverter {
    options: ConversionOptions,
    translations: Box<dyn Translations>,
}

impl AmpConverter {
    /// Create a converter with default options and English fallback text
    pub fn new() -> Self {
        Self::with_options(ConversionOptions::default())
    }

    /// Create a converter with custom options
    pub fn with_options(options: ConversionOptions) -> Self {
        Self {
            options,
            translations: Box::new(DefaultTranslations),
        }
    }

    /// Replace the translation backend used for fallback content
    pub fn set_translations(&mut self, translations: Box<dyn Translations>) {
        self.translations = translations;
    }

    /// Convert a post body to AMP markup
    ///
    /// # Arguments
    ///
    /// * `html` - Raw post/page body markup
    ///
    /// # Returns
    ///
    /// Returns `Ok(AmpResult)` holding the sanitized AMP markup and the
    /// usage registry on success. An empty post body converts to an empty
    /// result with no usage flags set.
    ///
    /// # Errors
    ///
    /// - `ConversionError::InvalidInput` - an audio/video element has no
    ///   playable source while `strict_media_sources` is enabled
    /// - `ConversionError::SerializeError` - writing the transformed tree
    ///   back to HTML failed
    ///
    /// Malformed attributes never fail conversion: dimensions and sandbox
    /// values degrade to defaults, and unrecognized iframe providers fall
    /// through to the generic `amp-iframe` path.
    pub fn convert(&self, html: &str) -> Result<AmpResult, ConversionError> {
        let dom = parse_html(html)?;

        // Classify before mutating: replacement detaches source nodes, so
        // the four family scans run against the untouched tree.
        let images = dom::collect_by_tag(&dom.document, "img");
        let iframes = dom::collect_by_tag(&dom.document, "iframe");
        let audios = dom::collect_by_tag(&dom.document, "audio");
        let videos = dom::collect_by_tag(&dom.document, "video");

        for img in &images {
            self.transform_image(img);
        }
        for iframe in &iframes {
            self.transform_iframe(iframe);
        }
        for audio in &audios {
            self.transform_audio(audio)?;
        }
        for video in &videos {
            self.transform_video(video)?;
        }

        let body = dom::find_body(&dom).ok_or_else(|| {
            ConversionError::InternalError("parsed document has no body".to_string())
        })?;

        // Sanitize before recording usage: removing a dangerous ancestor
        // also removes converted elements nested inside it, and the
        // registry must reflect only what the returned markup contains.
        sanitize_tree(&body);

        let mut elements = ElementUsage::new();
        for kind in AmpKind::ALL {
            if !dom::collect_by_tag(&body, kind.tag_name()).is_empty() {
                elements.mark(kind);
            }
        }

        let html = dom::inner_html(&body)?;
        Ok(AmpResult { html, elements })
    }

    /// Rewrite one `<img>` into `amp-img` or `amp-anim`
    ///
    /// Animated images (`.gif`) become `amp-anim`, whose allowlist drops
    /// `sizes`; everything else becomes `amp-img`. Small images (declared
    /// width under 300) render with fixed layout so the AMP runtime does
    /// not stretch them.
    fn transform_image(&self, img: &Handle) {
        let width = dom::get_attribute(img, "width");
        let layout = layout_for_width(width.as_deref());

        let src = dom::get_attribute(img, "src").unwrap_or_default();
        let kind = if is_gif_url(&src) {
            AmpKind::Anim
        } else {
            AmpKind::Img
        };

        let target = dom::create_element(kind.tag_name());
        project_attributes(kind.allowed_attributes(), img, &target);
        dom::set_attribute(&target, "layout", layout);

        dom::replace_node(img, &target);
    }

    /// Rewrite one `<iframe>` into `amp-youtube` or generic `amp-iframe`
    fn transform_iframe(&self, iframe: &Handle) {
        // Dimensions are normalized on the source before projection so the
        // copied width/height are always concrete values.
        self.normalize_dimensions(iframe);

        let src = dom::get_attribute(iframe, "src").unwrap_or_default();

        if let Some(id) = youtube::video_id(&src) {
            let target = dom::create_element(AmpKind::Youtube.tag_name());
            project_attributes(AmpKind::Youtube.allowed_attributes(), iframe, &target);
            dom::set_attribute(&target, "layout", "responsive");
            dom::set_attribute(&target, "data-videoid", &id);

            dom::replace_node(iframe, &target);
        } else {
            let target = dom::create_element(AmpKind::Iframe.tag_name());
            project_attributes(AmpKind::Iframe.allowed_attributes(), iframe, &target);
            dom::set_attribute(&target, "layout", "responsive");

            // An explicit sandbox is projected verbatim; only sandbox-less
            // iframes get the permissive default.
            if !dom::has_attribute(&target, "sandbox") {
                dom::set_attribute(&target, "sandbox", DEFAULT_SANDBOX);
            }

            dom::replace_node(iframe, &target);
        }
    }

    /// Rewrite one `<audio>` into `amp-audio`
    fn transform_audio(&self, audio: &Handle) -> Result<(), ConversionError> {
        let target = dom::create_element(AmpKind::Audio.tag_name());
        project_attributes(AmpKind::Audio.allowed_attributes(), audio, &target);
        self.apply_media_source(audio, &target, AmpKind::Audio)?;
        self.append_fallback(&target, AmpKind::Audio);

        dom::replace_node(audio, &target);
        Ok(())
    }

    /// Rewrite one `<video>` into `amp-video`
    fn transform_video(&self, video: &Handle) -> Result<(), ConversionError> {
        self.normalize_dimensions(video);

        let target = dom::create_element(AmpKind::Video.tag_name());
        project_attributes(AmpKind::Video.allowed_attributes(), video, &target);
        dom::set_attribute(&target, "layout", "responsive");
        // The AMP runtime renders no controls unless asked to
        dom::set_attribute(&target, "controls", "");
        self.apply_media_source(video, &target, AmpKind::Video)?;
        self.append_fallback(&target, AmpKind::Video);

        dom::replace_node(video, &target);
        Ok(())
    }

    /// Force concrete width/height on an element
    ///
    /// AMP layouts require pixel-style dimensions. A missing, empty or
    /// percentage value is replaced by the configured default (600x400
    /// unless overridden); anything else is left as-is, which makes the
    /// normalization idempotent.
    fn normalize_dimensions(&self, el: &Handle) {
        if !is_concrete_dimension(dom::get_attribute(el, "width").as_deref()) {
            dom::set_attribute(el, "width", &self.options.default_width.to_string());
        }
        if !is_concrete_dimension(dom::get_attribute(el, "height").as_deref()) {
            dom::set_attribute(el, "height", &self.options.default_height.to_string());
        }
    }

    /// Resolve and set the playable source for an audio/video target
    ///
    /// The first `<source>` child wins; an element without source children
    /// falls back to its own `src`. When neither yields a value the `src`
    /// attribute is omitted entirely - or, under `strict_media_sources`,
    /// the conversion fails so the caller can reject the post before
    /// publishing.
    fn apply_media_source(
        &self,
        source_el: &Handle,
        target: &Handle,
        kind: AmpKind,
    ) -> Result<(), ConversionError> {
        let sources = dom::collect_by_tag(source_el, "source");
        let src = if let Some(first) = sources.first() {
            dom::get_attribute(first, "src")
        } else {
            dom::get_attribute(source_el, "src")
        };

        match src.filter(|s| !s.is_empty()) {
            Some(src) => dom::set_attribute(target, "src", &src),
            None if self.options.strict_media_sources => {
                return Err(ConversionError::InvalidInput(format!(
                    "{} element has no playable source",
                    kind.i18n_key()
                )));
            }
            None => {}
        }
        Ok(())
    }

    /// Append localized fallback content to an audio/video target
    ///
    /// The block is a `<div fallback>` holding a paragraph with the
    /// translated "unsupported element" message; the bare `fallback`
    /// attribute marks it for the AMP runtime.
    fn append_fallback(&self, target: &Handle, kind: AmpKind) {
        let key = format!("fallback.{}", kind.i18n_key());
        let phrase = self.translations.translate(&key, &[]);
        let message = self
            .translations
            .translate("fallback.message", &[("element", phrase.as_str())]);

        let fallback_div = dom::create_element("div");
        dom::set_attribute(&fallback_div, "fallback", "");
        let paragraph = dom::create_element("p");
        dom::append_child(&paragraph, &dom::create_text(&message));
        dom::append_child(&fallback_div, &paragraph);
        dom::append_child(target, &fallback_div);
    }
}

impl Default for AmpConverter {
    fn default() -> Self {
        Self::new()
    }
}

/// Copy allowlisted attributes from a source element onto a target
///
/// Only attributes present on the source with a non-empty value are
/// copied; an empty attribute is never written. Pure with respect to the
/// source - only the target node is mutated.
fn project_attributes(allowed: &[&str], source: &Handle, target: &Handle) {
    for name in allowed {
        if let Some(value) = dom::get_attribute(source, name) {
            if !value.is_empty() {
                dom::set_attribute(target, name, &value);
            }
        }
    }
}

/// Pick the AMP layout for an image from its declared width
///
/// A numeric width under 300 renders fixed; undeclared or non-numeric
/// widths count as not-less-than-300 and render responsive.
fn layout_for_width(width: Option<&str>) -> &'static str {
    match width.and_then(|w| w.trim().parse::<f64>().ok()) {
        Some(w) if w < FIXED_LAYOUT_MAX_WIDTH => "fixed",
        _ => "responsive",
    }
}

/// True when a declared dimension is usable as-is (non-empty, no `%`)
fn is_concrete_dimension(value: Option<&str>) -> bool {
    match value {
        Some(v) => !v.is_empty() && !v.contains('%'),
        None => false,
    }
}

/// True when a source URL's file extension is `.gif`, case-insensitively
///
/// Query strings and fragments are not part of the extension.
fn is_gif_url(src: &str) -> bool {
    let path = src.split(&['?', '#'][..]).next().unwrap_or(src);
    let segment = path.rsplit('/').next().unwrap_or(path);
    match segment.rsplit_once('.') {
        Some((_, ext)) => ext.eq_ignore_ascii_case("gif"),
        None => false,
    }
}

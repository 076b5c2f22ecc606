//! Per-kind transformation descriptors for AMP target elements
//!
//! Each handled source element family is rewritten into one of six AMP
//! custom element kinds. The rewrite rules differ only in data: the target
//! tag name, the attribute allowlist projected from the source element,
//! and the i18n key used for fallback content. Centralizing that data here
//! keeps the transformers free of duplicated inline tables and lets each
//! descriptor be unit tested in isolation.
//!
//! Attribute names are stored lowercase because html5ever lowercases
//! attribute names during parsing (`controlsList` arrives as
//! `controlslist`). HTML attribute names are case-insensitive, so the
//! emitted markup is equivalent.

/// Attributes copied onto `amp-img` elements
pub const AMP_IMG_ATTRIBUTES: &[&str] = &[
    "src",
    "srcset",
    "sizes",
    "alt",
    "attribution",
    "width",
    "height",
];

/// Attributes copied onto `amp-anim` elements (no `sizes`)
pub const AMP_ANIM_ATTRIBUTES: &[&str] =
    &["src", "srcset", "alt", "attribution", "width", "height"];

/// Attributes copied onto `amp-youtube` elements
pub const AMP_YOUTUBE_ATTRIBUTES: &[&str] = &["width", "height"];

/// Attributes copied onto `amp-iframe` elements
pub const AMP_IFRAME_ATTRIBUTES: &[&str] = &[
    "src",
    "srcdoc",
    "frameborder",
    "allowfullscreen",
    "allowtransparency",
    "referrerpolicy",
    "sandbox",
    "width",
    "height",
];

/// Attributes copied onto `amp-audio` elements
pub const AMP_AUDIO_ATTRIBUTES: &[&str] = &[
    "preload",
    "autoplay",
    "loop",
    "muted",
    "controlslist",
    "artwork",
    "artist",
    "album",
    "title",
];

/// Attributes copied onto `amp-video` elements
pub const AMP_VIDEO_ATTRIBUTES: &[&str] = &[
    "src",
    "poster",
    "autoplay",
    "controlslist",
    "dock",
    "loop",
    "crossorigin",
    "disableremoteplayback",
    "noaudio",
    "rotate-to-fullscreen",
    "artwork",
    "artist",
    "album",
    "title",
    "width",
    "height",
];

/// The six AMP custom element kinds this converter emits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AmpKind {
    Img,
    Anim,
    Youtube,
    Iframe,
    Audio,
    Video,
}

impl AmpKind {
    /// All kinds, in no significant order
    pub const ALL: [AmpKind; 6] = [
        AmpKind::Img,
        AmpKind::Anim,
        AmpKind::Youtube,
        AmpKind::Iframe,
        AmpKind::Audio,
        AmpKind::Video,
    ];

    /// The custom element tag name emitted for this kind
    pub fn tag_name(self) -> &'static str {
        match self {
            AmpKind::Img => "amp-img",
            AmpKind::Anim => "amp-anim",
            AmpKind::Youtube => "amp-youtube",
            AmpKind::Iframe => "amp-iframe",
            AmpKind::Audio => "amp-audio",
            AmpKind::Video => "amp-video",
        }
    }

    /// The attribute allowlist projected onto this kind
    pub fn allowed_attributes(self) -> &'static [&'static str] {
        match self {
            AmpKind::Img => AMP_IMG_ATTRIBUTES,
            AmpKind::Anim => AMP_ANIM_ATTRIBUTES,
            AmpKind::Youtube => AMP_YOUTUBE_ATTRIBUTES,
            AmpKind::Iframe => AMP_IFRAME_ATTRIBUTES,
            AmpKind::Audio => AMP_AUDIO_ATTRIBUTES,
            AmpKind::Video => AMP_VIDEO_ATTRIBUTES,
        }
    }

    /// The translation key suffix for fallback content: the tag name with
    /// its `amp-` prefix stripped
    pub fn i18n_key(self) -> &'static str {
        match self {
            AmpKind::Img => "img",
            AmpKind::Anim => "anim",
            AmpKind::Youtube => "youtube",
            AmpKind::Iframe => "iframe",
            AmpKind::Audio => "audio",
            AmpKind::Video => "video",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_names() {
        assert_eq!(AmpKind::Img.tag_name(), "amp-img");
        assert_eq!(AmpKind::Anim.tag_name(), "amp-anim");
        assert_eq!(AmpKind::Youtube.tag_name(), "amp-youtube");
        assert_eq!(AmpKind::Iframe.tag_name(), "amp-iframe");
        assert_eq!(AmpKind::Audio.tag_name(), "amp-audio");
        assert_eq!(AmpKind::Video.tag_name(), "amp-video");
    }

    #[test]
    fn test_anim_allowlist_excludes_sizes() {
        assert!(AMP_IMG_ATTRIBUTES.contains(&"sizes"));
        assert!(!AMP_ANIM_ATTRIBUTES.contains(&"sizes"));
    }

    #[test]
    fn test_youtube_allowlist_is_dimensions_only() {
        assert_eq!(AMP_YOUTUBE_ATTRIBUTES, &["width", "height"]);
    }

    #[test]
    fn test_i18n_key_is_tag_without_prefix() {
        for kind in AmpKind::ALL {
            let expected = kind.tag_name().strip_prefix("amp-").unwrap();
            assert_eq!(kind.i18n_key(), expected);
        }
    }

    #[test]
    fn test_allowlists_are_lowercase() {
        // html5ever lowercases attribute names while parsing; a mixed-case
        // entry here could never match a parsed attribute.
        for kind in AmpKind::ALL {
            for attr in kind.allowed_attributes() {
                assert_eq!(*attr, attr.to_lowercase());
            }
        }
    }
}

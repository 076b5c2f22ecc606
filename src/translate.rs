//! Translation lookup for fallback content
//!
//! Fallback blocks appended to `amp-audio`/`amp-video` elements carry a
//! localized "unsupported element" message. The surrounding application
//! owns the real locale tables; this module exposes the lookup as a trait
//! so the converter can be handed any backend, plus a built-in English
//! table so the converter works out of the box.
//!
//! Keys follow the `fallback.<element>` / `fallback.message` naming used
//! by the application's locale files, and message templates interpolate
//! `{{name}}` placeholders from the supplied parameters.

/// Translation collaborator consumed by the fallback injector
///
/// Implementations resolve a dotted key to a phrase, substituting any
/// `{{name}}` placeholders from `params`. Implementations must support at
/// least `fallback.message` (with an `element` parameter) and
/// `fallback.<kind>` for the six element kinds this converter emits.
pub trait Translations {
    /// Resolve a key to a localized phrase
    fn translate(&self, key: &str, params: &[(&str, &str)]) -> String;
}

/// Built-in English translations
///
/// Used when no external translation backend is supplied.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTranslations;

impl DefaultTranslations {
    fn lookup(key: &str) -> Option<&'static str> {
        match key {
            "fallback.img" => Some("image"),
            "fallback.anim" => Some("animation"),
            "fallback.youtube" => Some("YouTube video"),
            "fallback.iframe" => Some("frame"),
            "fallback.audio" => Some("audio"),
            "fallback.video" => Some("video"),
            "fallback.message" => Some("Your browser does not support the {{element}} element."),
            _ => None,
        }
    }
}

impl Translations for DefaultTranslations {
    fn translate(&self, key: &str, params: &[(&str, &str)]) -> String {
        // Unknown keys echo back, the conventional i18n miss behavior
        let template = Self::lookup(key).unwrap_or(key);
        substitute(template, params)
    }
}

/// Replace `{{name}}` placeholders in a template with parameter values
fn substitute(template: &str, params: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (name, value) in params {
        let placeholder = format!("{{{{{}}}}}", name);
        result = result.replace(&placeholder, value);
    }
    result
}

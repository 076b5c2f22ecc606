//! Usage registry for emitted AMP element kinds
//!
//! Each conversion run records which of the six AMP custom element kinds
//! its output actually contains, so the caller can decide which AMP
//! runtime scripts to include in the rendered page. The registry is
//! filled from a scan of the finished output tree and returned with the
//! result; it is never shared across runs.

use crate::rules::AmpKind;

/// Per-run record of which AMP element kinds appear in the output
///
/// Consumers must treat this as an unordered flag set; no meaning is
/// attached to field or iteration order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ElementUsage {
    amp_img: bool,
    amp_anim: bool,
    amp_youtube: bool,
    amp_iframe: bool,
    amp_audio: bool,
    amp_video: bool,
}

impl ElementUsage {
    /// Create a registry with all flags unset
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that at least one element of the given kind is present
    pub fn mark(&mut self, kind: AmpKind) {
        match kind {
            AmpKind::Img => self.amp_img = true,
            AmpKind::Anim => self.amp_anim = true,
            AmpKind::Youtube => self.amp_youtube = true,
            AmpKind::Iframe => self.amp_iframe = true,
            AmpKind::Audio => self.amp_audio = true,
            AmpKind::Video => self.amp_video = true,
        }
    }

    /// Check whether at least one element of the given kind was emitted
    pub fn is_used(&self, kind: AmpKind) -> bool {
        match kind {
            AmpKind::Img => self.amp_img,
            AmpKind::Anim => self.amp_anim,
            AmpKind::Youtube => self.amp_youtube,
            AmpKind::Iframe => self.amp_iframe,
            AmpKind::Audio => self.amp_audio,
            AmpKind::Video => self.amp_video,
        }
    }

    /// Iterate over all kinds and their flags
    pub fn iter(&self) -> impl Iterator<Item = (AmpKind, bool)> + '_ {
        AmpKind::ALL.into_iter().map(|kind| (kind, self.is_used(kind)))
    }

    /// True when no AMP element was emitted at all
    pub fn is_empty(&self) -> bool {
        AmpKind::ALL.into_iter().all(|kind| !self.is_used(kind))
    }
}

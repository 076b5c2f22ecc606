//! YouTube URL detection for embedded iframes
//!
//! Recognizes the URL shapes YouTube embeds arrive in and extracts the
//! 11-character video identifier. The pattern is based on the one used by
//! the amperize project and covers:
//!
//! - `youtu.be/<id>`
//! - `youtube.com/v/<id>`
//! - `youtube.com/<user>/u/<n>/<id>`
//! - `youtube.com/embed/<id>`
//! - `youtube.com/watch?v=<id>`
//! - the `youtube-nocookie.com` variants of the above

use regex::Regex;
use std::sync::OnceLock;

fn youtube_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^.*(youtu\.be/|youtube(-nocookie)?\.com/(v/|.*u/\w/|embed/|.*v=))([\w-]{11}).*")
            .expect("static YouTube pattern must compile")
    })
}

/// Extract the video id from a YouTube embed URL
///
/// Returns `None` for URLs that do not match any recognized YouTube form;
/// such iframes fall through to the generic `amp-iframe` path.
///
/// # Examples
///
/// ```rust
/// use amp_converter::youtube::video_id;
///
/// assert_eq!(
///     video_id("https://www.youtube.com/embed/rfscVS0vtbw"),
///     Some("rfscVS0vtbw".to_string())
/// );
/// assert_eq!(video_id("https://example.com/widget"), None);
/// ```
pub fn video_id(src: &str) -> Option<String> {
    youtube_pattern()
        .captures(src)
        .and_then(|captures| captures.get(4))
        .map(|id| id.as_str().to_string())
}

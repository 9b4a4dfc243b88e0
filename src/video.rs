//! Video link normalization
//!
//! Editors paste whatever link their video site gives them; the reading
//! surface needs a URL that can go straight into a player frame.

use url::Url;

const YOUTUBE_EMBED: &str = "https://www.youtube.com/embed/";
const VIMEO_PLAYER: &str = "https://player.vimeo.com/video/";

/// Rewrite a known video-sharing URL into an embeddable player URL.
///
/// Rules are checked in order and the first match wins:
/// 1. `youtube.com/watch` links use their `v` query parameter
/// 2. `youtu.be/<id>` short links use the path segment up to any `?`
/// 3. `vimeo.com/<id>` links use everything after the marker
/// 4. anything else is returned unchanged
///
/// Extracted ids are not validated. When an id cannot be extracted the link
/// is returned unchanged.
///
/// # Examples
///
/// ```
/// use realnews::video::embed_url;
///
/// assert_eq!(
///     embed_url("https://www.youtube.com/watch?v=abc123"),
///     "https://www.youtube.com/embed/abc123"
/// );
/// assert_eq!(
///     embed_url("https://example.com/video.mp4"),
///     "https://example.com/video.mp4"
/// );
/// ```
pub fn embed_url(link: &str) -> String {
    if link.contains("youtube.com/watch") {
        return youtube_watch_id(link)
            .map(|id| format!("{}{}", YOUTUBE_EMBED, id))
            .unwrap_or_else(|| link.to_string());
    }

    if let Some((_, rest)) = link.split_once("youtu.be/") {
        let id = rest.split('?').next().unwrap_or_default();
        if id.is_empty() {
            return link.to_string();
        }
        return format!("{}{}", YOUTUBE_EMBED, id);
    }

    if link.contains("vimeo.com") {
        return match link.split_once("vimeo.com/") {
            Some((_, id)) if !id.is_empty() => format!("{}{}", VIMEO_PLAYER, id),
            _ => link.to_string(),
        };
    }

    link.to_string()
}

fn youtube_watch_id(link: &str) -> Option<String> {
    let url = Url::parse(link).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == "v")
        .map(|(_, value)| value.into_owned())
        .filter(|id| !id.is_empty())
}

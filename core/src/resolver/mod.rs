//! Playlist link parsing.
//!
//! Accepts `https://open.spotify.com/playlist/<id>` with an optional query
//! string (`?si=...`). The whole input must be the link; anything else is
//! rejected before a request is made.

use once_cell::sync::Lazy;
use regex::Regex;

/// Fixed, case-sensitive prefix of a playlist link.
pub const PLAYLIST_URL_PREFIX: &str = "https://open.spotify.com/playlist/";

static PLAYLIST_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https://open\.spotify\.com/playlist/([a-zA-Z0-9]+)(\?.*)?$")
        .expect("playlist link pattern is valid")
});

/// Extract the playlist id from a link, or `None` if it is not a playlist link.
///
/// # Example
/// ```
/// use tunestats_core::parse_playlist_id;
///
/// assert_eq!(
///     parse_playlist_id("https://open.spotify.com/playlist/37i9dQZF1?si=abc"),
///     Some("37i9dQZF1"),
/// );
/// assert_eq!(parse_playlist_id("https://example.com/foo"), None);
/// ```
pub fn parse_playlist_id(link: &str) -> Option<&str> {
    PLAYLIST_LINK
        .captures(link.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_link() {
        assert_eq!(
            parse_playlist_id("https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M"),
            Some("37i9dQZF1DXcBWIGoYBM5M")
        );
    }

    #[test]
    fn test_link_with_query() {
        assert_eq!(
            parse_playlist_id("https://open.spotify.com/playlist/37i9dQZF1?si=7f3a2b&pt=x"),
            Some("37i9dQZF1")
        );
        assert_eq!(parse_playlist_id("https://open.spotify.com/playlist/abc?"), Some("abc"));
    }

    #[test]
    fn test_surrounding_whitespace() {
        assert_eq!(
            parse_playlist_id("  https://open.spotify.com/playlist/abc123\n"),
            Some("abc123")
        );
    }

    #[test]
    fn test_rejects_other_hosts_and_paths() {
        let rejected = [
            "",
            "https://example.com/foo",
            "https://open.spotify.com/playlist/",
            "https://open.spotify.com/album/37i9dQZF1",
            "https://open.spotify.com/track/37i9dQZF1",
            "http://open.spotify.com/playlist/37i9dQZF1",
            "https://open.spotify.com.evil.io/playlist/37i9dQZF1",
            "https://evil.io/https://open.spotify.com/playlist/37i9dQZF1",
            "https://open.spotify.com/playlist/37i9dQZF1/tracks",
            "https://open.spotify.com/playlist/37i9-dQZF1",
            "spotify:playlist:37i9dQZF1",
        ];

        for link in rejected {
            assert_eq!(parse_playlist_id(link), None, "{} should not match", link);
        }
    }

    #[test]
    fn test_prefix_is_case_sensitive() {
        assert_eq!(parse_playlist_id("HTTPS://OPEN.SPOTIFY.COM/PLAYLIST/abc"), None);
        assert_eq!(parse_playlist_id("https://open.spotify.com/Playlist/abc"), None);
    }

    #[test]
    fn test_id_keeps_case() {
        assert_eq!(
            parse_playlist_id(&format!("{}AbCdEf09", PLAYLIST_URL_PREFIX)),
            Some("AbCdEf09")
        );
    }
}

//! Spotify Web API client for the browser.

use gloo_net::http::Request;
use tunestats_core::{FetchError, Playlist, PlaylistSource};

/// Fetches playlists straight from the Web API with the user's token.
#[derive(Debug, Clone)]
pub struct SpotifyService {
    api_base: String,
}

impl SpotifyService {
    pub fn new(api_base: &str) -> Self {
        Self {
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    pub fn playlist_url(&self, playlist_id: &str) -> String {
        format!("{}/playlists/{}", self.api_base, playlist_id)
    }
}

impl Default for SpotifyService {
    fn default() -> Self {
        Self::new(crate::SPOTIFY_API_BASE)
    }
}

impl PlaylistSource for SpotifyService {
    async fn fetch_playlist(&self, playlist_id: &str, access_token: &str) -> Result<Playlist, FetchError> {
        let response = Request::get(&self.playlist_url(playlist_id))
            .header("Authorization", &format!("Bearer {}", access_token))
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        if !response.ok() {
            return Err(FetchError::Status(response.status()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Playlist::from_json(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_playlist_url() {
        let service = SpotifyService::new("https://api.spotify.com/v1/");
        assert_eq!(
            service.playlist_url("37i9dQZF1"),
            "https://api.spotify.com/v1/playlists/37i9dQZF1"
        );
        assert_eq!(
            SpotifyService::default().playlist_url("x"),
            "https://api.spotify.com/v1/playlists/x"
        );
    }
}

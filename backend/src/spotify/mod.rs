//! Spotify Web API playlist client.
//!
//! A single read-only request per export:
//! `GET {api_base}/playlists/{id}` with a bearer token. No retries; any
//! failure goes straight back to the caller.

use std::time::Duration;

use tunestats_core::{FetchError, Playlist, PlaylistSource};

/// Default Web API base URL.
pub const SPOTIFY_API_BASE: &str = "https://api.spotify.com/v1";

/// Per-request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Spotify API client
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    api_base: String,
    client: reqwest::Client,
}

impl SpotifyClient {
    pub fn new() -> Self {
        Self::with_api_base(SPOTIFY_API_BASE)
    }

    /// Point the client at another API root (proxies, tests).
    pub fn with_api_base(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn playlist_url(&self, playlist_id: &str) -> String {
        format!("{}/playlists/{}", self.api_base, playlist_id)
    }
}

impl Default for SpotifyClient {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaylistSource for SpotifyClient {
    async fn fetch_playlist(&self, playlist_id: &str, access_token: &str) -> Result<Playlist, FetchError> {
        let response = self
            .client
            .get(self.playlist_url(playlist_id))
            .bearer_auth(access_token)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
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
    use axum::{
        extract::Path,
        http::{header, HeaderMap, StatusCode},
        routing::get,
        Router,
    };
    use serde_json::json;

    /// Serve a fake `/playlists/{id}` that wants `Bearer good`.
    async fn spawn_fake_api() -> String {
        async fn playlist(Path(id): Path<String>, headers: HeaderMap) -> (StatusCode, String) {
            let auth = headers
                .get(header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("");
            if auth != "Bearer good" {
                return (StatusCode::UNAUTHORIZED, r#"{"error":{"status":401}}"#.to_string());
            }
            let body = json!({
                "id": id,
                "name": "Fake Mix",
                "tracks": {"items": [
                    {"track": {"id": "t1", "name": "One", "artists": [{"name": "A"}]}}
                ]}
            });
            (StatusCode::OK, body.to_string())
        }

        let app = Router::new().route("/playlists/{id}", get(playlist));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{}", addr)
    }

    #[test]
    fn test_playlist_url() {
        let client = SpotifyClient::with_api_base("http://localhost:9000/v1/");
        assert_eq!(client.playlist_url("abc"), "http://localhost:9000/v1/playlists/abc");
        assert_eq!(
            SpotifyClient::new().playlist_url("37i9dQZF1"),
            "https://api.spotify.com/v1/playlists/37i9dQZF1"
        );
    }

    #[tokio::test]
    async fn test_fetch_playlist() {
        let client = SpotifyClient::with_api_base(spawn_fake_api().await);

        let playlist = client.fetch_playlist("abc", "good").await.unwrap();
        assert_eq!(playlist.name, "Fake Mix");
        assert_eq!(playlist.tracks.len(), 1);
        assert_eq!(playlist.tracks[0].id, "t1");
    }

    #[tokio::test]
    async fn test_bad_token_is_status_error() {
        let client = SpotifyClient::with_api_base(spawn_fake_api().await);

        let err = client.fetch_playlist("abc", "bad").await.unwrap_err();
        assert_eq!(err, FetchError::Status(401));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = SpotifyClient::with_api_base(format!("http://{}", addr));
        let err = client.fetch_playlist("abc", "good").await.unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
    }
}

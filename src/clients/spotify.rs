use std::path::PathBuf;

use async_trait::async_trait;
use log::debug;

use crate::clients::{
    entities::{AccountId, Playlist, TrackCandidate},
    errors::{Error, Result},
    traits::MusicService,
};
use rspotify::{
    AuthCodeSpotify, Config, Credentials, OAuth,
    model::{FullPlaylist, FullTrack, PlayableId, PlaylistId, SearchResult, SearchType, TrackId, UserId},
    prelude::*,
    scopes,
};

const PLAYLIST_WEB_URL: &str = "https://open.spotify.com/playlist";

// Tracks without an id (local files) cannot be added to a playlist
fn candidate_from(track: FullTrack) -> Option<TrackCandidate> {
    let id = track.id?;
    Some(TrackCandidate {
        id: id.id().to_string(),
        name: track.name,
        artists: track.artists.into_iter().map(|a| a.name).collect(),
    })
}

impl From<FullPlaylist> for Playlist {
    fn from(p: FullPlaylist) -> Playlist {
        let id = p.id.id().to_string();
        let external_url = p
            .external_urls
            .get("spotify")
            .cloned()
            .unwrap_or_else(|| playlist_web_url(&id));
        Playlist { id, external_url }
    }
}

fn playlist_web_url(id: &str) -> String {
    format!("{PLAYLIST_WEB_URL}/{id}")
}

fn search_query(title: &str, artist: &str, year: &str) -> String {
    format!("track:{title} artist:{artist} year:{year}")
}

fn parse_track_ids(track_ids: &[String]) -> Result<Vec<TrackId<'_>>> {
    if track_ids.is_empty() {
        return Err(Error::AddTracksError("no track ids given".into()));
    }
    track_ids
        .iter()
        .map(|id| {
            TrackId::from_id_or_uri(id)
                .map_err(|e| Error::AddTracksError(format!("invalid track id {id:?}: {e}")))
        })
        .collect()
}

pub struct SpotifyClient {
    pub spotify: AuthCodeSpotify,
}

impl SpotifyClient {
    pub fn new(spotify: AuthCodeSpotify) -> Self {
        SpotifyClient { spotify }
    }

    // Create a SpotifyClient from environment variables, before any network call
    pub fn try_default() -> Result<Self> {
        Self::from_parts(
            Credentials::from_env(),
            OAuth::from_env(scopes!("playlist-modify-private")),
        )
    }

    // Missing settings are reported here; nothing touches the network
    pub fn from_parts(creds: Option<Credentials>, oauth: Option<OAuth>) -> Result<Self> {
        let creds = creds.ok_or_else(|| {
            Error::AuthError(
                "Missing RSPOTIFY_CLIENT_ID / RSPOTIFY_CLIENT_SECRET in environment variables. Check README.md for details.".into(),
            )
        })?;
        let oauth = oauth.ok_or_else(|| {
            Error::AuthError(
                "Missing RSPOTIFY_REDIRECT_URI in environment variables. Check README.md for details.".into(),
            )
        })?;

        let cache_path = dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from("/tmp")) // Fallback to /tmp if cache directory can't be determined
            .join(".hot100_playlist_token_cache");

        let spotify = AuthCodeSpotify::with_config(
            creds,
            oauth,
            Config {
                token_cached: true,
                cache_path,
                ..Default::default()
            },
        );

        Ok(Self { spotify })
    }
}

#[async_trait]
impl MusicService for SpotifyClient {
    // Reuses the cached token when valid, otherwise shows the consent page
    // and reads the redirect URL from the terminal (`cli` feature).
    async fn authenticate(&self) -> Result<AccountId> {
        debug!("Starting Spotify authorization ...");
        let url = self
            .spotify
            .get_authorize_url(true)
            .map_err(|e| Error::AuthError(e.to_string()))?;
        self.spotify
            .prompt_for_token(&url)
            .await
            .map_err(|e| Error::AuthError(e.to_string()))?;
        let user = self
            .spotify
            .me()
            .await
            .map_err(|e| Error::AuthError(e.to_string()))?;
        debug!("Authenticated as user: {:?}", user.display_name);
        Ok(AccountId(user.id.id().to_string()))
    }

    async fn search_track(
        &self,
        title: &str,
        artist: &str,
        year: &str,
    ) -> Result<Vec<TrackCandidate>> {
        let query = search_query(title, artist, year);
        debug!("Searching Spotify for {query:?}");
        let result = self
            .spotify
            .search(&query, SearchType::Track, None, None, None, None)
            .await
            .map_err(|e| Error::SearchError(format!("{query:?}: {e}")))?;
        match result {
            SearchResult::Tracks(page) => Ok(page.items.into_iter().filter_map(candidate_from).collect()),
            other => Err(Error::SearchError(format!(
                "expected track results for {query:?}, got {other:?}"
            ))),
        }
    }

    async fn create_playlist(&self, account: &AccountId, name: &str) -> Result<Playlist> {
        let user_id = UserId::from_id(account.as_str())
            .map_err(|e| Error::CreatePlaylistError(format!("invalid account id: {e}")))?;
        let playlist = self
            .spotify
            .user_playlist_create(user_id, name, Some(false), Some(false), None)
            .await
            .map_err(|e| Error::CreatePlaylistError(e.to_string()))?;
        debug!("Created playlist {:?} ({})", playlist.name, playlist.id);
        Ok(Playlist::from(playlist))
    }

    async fn add_tracks(&self, playlist_id: &str, track_ids: &[String]) -> Result<()> {
        let playlist = PlaylistId::from_id_or_uri(playlist_id)
            .map_err(|e| Error::AddTracksError(format!("invalid playlist id {playlist_id:?}: {e}")))?;
        let tracks = parse_track_ids(track_ids)?;
        let snapshot = self
            .spotify
            .playlist_add_items(playlist, tracks.into_iter().map(PlayableId::Track), None)
            .await
            .map_err(|e| Error::AddTracksError(e.to_string()))?;
        debug!(
            "Added {} tracks to playlist {playlist_id}, snapshot {}",
            track_ids.len(),
            snapshot.snapshot_id
        );
        Ok(())
    }
}

use async_trait::async_trait;

use crate::chart_date::ChartDate;
use crate::clients::entities::{AccountId, ChartEntry, Playlist, TrackCandidate};
use crate::clients::errors::Result;

/// Source of ranked chart rows for a given week.
#[async_trait]
pub trait ChartSource {
    /// Fetch the chart for `date`, rows in rank order.
    async fn fetch_entries(&self, date: &ChartDate) -> Result<Vec<ChartEntry>>;
}

/// Operations the playlist builder needs from a streaming service.
///
/// Every method is a single round-trip. `authenticate` must run first; the
/// returned [`AccountId`] is handed back to calls that act on the account.
#[async_trait]
pub trait MusicService {
    /// Run the authorization flow and return the account it granted.
    async fn authenticate(&self) -> Result<AccountId>;

    /// Search tracks by title, artist and release year.
    ///
    /// An empty vector means no match, which is not an error.
    async fn search_track(&self, title: &str, artist: &str, year: &str)
    -> Result<Vec<TrackCandidate>>;

    /// Create a private playlist named `name` owned by `account`.
    async fn create_playlist(&self, account: &AccountId, name: &str) -> Result<Playlist>;

    /// Append `track_ids` to the playlist in order, all or nothing.
    async fn add_tracks(&self, playlist_id: &str, track_ids: &[String]) -> Result<()>;
}

/// Opens a URL for the user to look at.
#[cfg_attr(test, mockall::automock)]
pub trait BrowserOpener {
    /// Hand `url` to the browser, without waiting for it to load.
    fn open(&self, url: &str) -> Result<()>;
}

#[async_trait]
impl<T: ChartSource + Sync + ?Sized> ChartSource for &T {
    async fn fetch_entries(&self, date: &ChartDate) -> Result<Vec<ChartEntry>> {
        (**self).fetch_entries(date).await
    }
}

#[async_trait]
impl<T: MusicService + Sync + ?Sized> MusicService for &T {
    async fn authenticate(&self) -> Result<AccountId> {
        (**self).authenticate().await
    }

    async fn search_track(&self, title: &str, artist: &str, year: &str)
    -> Result<Vec<TrackCandidate>> {
        (**self).search_track(title, artist, year).await
    }

    async fn create_playlist(&self, account: &AccountId, name: &str) -> Result<Playlist> {
        (**self).create_playlist(account, name).await
    }

    async fn add_tracks(&self, playlist_id: &str, track_ids: &[String]) -> Result<()> {
        (**self).add_tracks(playlist_id, track_ids).await
    }
}

impl<T: BrowserOpener + ?Sized> BrowserOpener for &T {
    fn open(&self, url: &str) -> Result<()> {
        (**self).open(url)
    }
}

use std::fmt;

/// Prefix of every playlist name created by this tool
pub const PLAYLIST_TITLE_PREFIX: &str = "Top 100 Songs - ";

/// One song row scraped from the chart page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartEntry {
    pub artist: String,
    pub title: String,
}

impl ChartEntry {
    pub fn new(artist: impl Into<String>, title: impl Into<String>) -> Self {
        ChartEntry {
            artist: artist.into(),
            title: title.into(),
        }
    }
}

impl fmt::Display for ChartEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.artist, self.title)
    }
}

/// A single track returned by a search, in service ranking order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackCandidate {
    pub id: String,
    pub name: String,
    pub artists: Vec<String>, // may be empty for some catalogue entries
}

/// Spotify user id of the authorized account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountId(pub String);

impl AccountId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    pub id: String,
    pub external_url: String,
}

/// Name of the playlist created for a chart week
pub fn playlist_title(date: &str) -> String {
    format!("{PLAYLIST_TITLE_PREFIX}{date}")
}

use futures::stream::{self, StreamExt, TryStreamExt};
use log::{debug, info, warn};

use crate::chart_date::ChartDate;
use crate::clients::{
    BrowserOpener, ChartScraper, ChartSource, MusicService, SpotifyClient, SystemBrowser,
    entities::{ChartEntry, Playlist, TrackCandidate, playlist_title},
    errors::Result,
};

// Collaborators of a PlaylistMaker
pub struct Config<C, M, B> {
    pub chart: C,
    pub music: M,
    pub browser: B,
}

pub struct ConfigBuilder;

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self
    }

    // Missing Spotify settings fail here, before anything touches the network
    pub fn build(self) -> Result<Config<ChartScraper, SpotifyClient, SystemBrowser>> {
        let music = SpotifyClient::try_default()?;
        let chart = ChartScraper::try_default()?;
        Ok(Config {
            chart,
            music,
            browser: SystemBrowser,
        })
    }
}

/// Outcome of a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub playlist: Playlist,
    /// Chart entries that were searched for
    pub attempted: usize,
    /// Tracks appended to the playlist
    pub added: usize,
}

/// Builds a playlist from one chart week: scrape, search, create, fill, open.
pub struct PlaylistMaker<C, M, B> {
    config: Config<C, M, B>,
}

impl<C, M, B> PlaylistMaker<C, M, B>
where
    C: ChartSource,
    M: MusicService,
    B: BrowserOpener,
{
    pub fn new(config: Config<C, M, B>) -> Self {
        PlaylistMaker { config }
    }

    pub async fn run(&self, date: &ChartDate) -> Result<RunSummary> {
        info!("Fetching the chart for {date} ...");
        let entries = self.config.chart.fetch_entries(date).await?;

        info!("Authorizing Spotify client ...");
        // CLI prompts may be shown on this call
        let account = self.config.music.authenticate().await?;

        info!("Searching Spotify for {} songs ...", entries.len());
        let track_ids = resolve_track_ids(&self.config.music, &entries, date.year()).await?;
        info!(
            "Matched {} of {} songs on Spotify",
            track_ids.len(),
            entries.len()
        );

        let playlist = self
            .config
            .music
            .create_playlist(&account, &playlist_title(date.as_str()))
            .await?;
        info!("Created playlist {}", playlist.id);

        if track_ids.is_empty() {
            warn!("No chart entries matched a Spotify track, leaving the playlist empty");
        } else {
            self.config
                .music
                .add_tracks(&playlist.id, &track_ids)
                .await?;
            info!("Added {} tracks to the playlist", track_ids.len());
        }

        self.config.browser.open(&playlist.external_url)?;

        Ok(RunSummary {
            playlist,
            attempted: entries.len(),
            added: track_ids.len(),
        })
    }
}

/// Look up each entry in order, one request at a time, keeping the first
/// candidate's id. Entries without candidates are dropped.
pub async fn resolve_track_ids<M>(music: &M, entries: &[ChartEntry], year: &str) -> Result<Vec<String>>
where
    M: MusicService + ?Sized,
{
    let matches: Vec<Option<String>> = stream::iter(entries)
        .then(|entry| async move {
            music
                .search_track(&entry.title, &entry.artist, year)
                .await
                .map(|candidates| first_match(entry, candidates))
        })
        .try_collect()
        .await?;

    Ok(matches.into_iter().flatten().collect())
}

fn first_match(entry: &ChartEntry, candidates: Vec<TrackCandidate>) -> Option<String> {
    match candidates.into_iter().next() {
        Some(track) => {
            debug!(
                "{entry} -> {} by {} ({})",
                track.name,
                track.artists.join(", "),
                track.id
            );
            Some(track.id)
        }
        None => {
            warn!("No Spotify match for {entry}, skipping");
            None
        }
    }
}

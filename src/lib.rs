//! Hot100 - Turn a weekly Billboard Hot 100 chart into a Spotify playlist
//!
//! This library scrapes the chart for a given week, matches every song on
//! Spotify and fills a new private playlist with the matches.

/// Validated chart week dates
pub mod chart_date;
/// Client modules for interacting with external services
pub mod clients;
/// Scrape, match and fill pipeline
pub mod playlist_maker;

pub use chart_date::ChartDate;
pub use playlist_maker::{Config, ConfigBuilder, PlaylistMaker, RunSummary};

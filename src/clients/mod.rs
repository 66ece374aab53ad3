/// Billboard chart scraper
pub mod billboard;
/// Default browser launcher
pub mod browser;
/// Data entities for chart rows, tracks and playlists
pub mod entities;
/// Error types and result aliases
pub mod errors;
/// Spotify API client
pub mod spotify;
/// Seams between the playlist builder and the outside world
pub mod traits;

pub use billboard::ChartScraper;
pub use browser::SystemBrowser;
pub use spotify::SpotifyClient;
pub use traits::{BrowserOpener, ChartSource, MusicService};

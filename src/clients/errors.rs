use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid date {0:?}, expected YYYY-MM-DD")]
    InputError(String),

    #[error("Failed to fetch chart page: {0}")]
    FetchError(String),

    #[error("Failed to parse chart page: {0}")]
    ParseError(String),

    #[error("Spotify authorization failed: {0}")]
    AuthError(String),

    #[error("Spotify search failed: {0}")]
    SearchError(String),

    #[error("Failed to create playlist: {0}")]
    CreatePlaylistError(String),

    #[error("Failed to add tracks to playlist: {0}")]
    AddTracksError(String),

    #[error("Failed to open browser: {0}")]
    BrowserError(String),

    #[error("Terminal I/O error: {0}")]
    IoError(String),
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IoError(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::FetchError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    #[test]
    fn io_failures_are_not_reported_as_bad_dates() {
        let err = Error::from(io::Error::new(io::ErrorKind::BrokenPipe, "Broken pipe"));
        assert!(matches!(err, Error::IoError(_)));
        assert_eq!(err.to_string(), "Terminal I/O error: Broken pipe");
    }

    #[test]
    fn bad_date_message_names_expected_format() {
        let err = Error::InputError("2024/01/06".into());
        assert_eq!(
            err.to_string(),
            "Invalid date \"2024/01/06\", expected YYYY-MM-DD"
        );
    }
}

use log::debug;

use crate::clients::{
    errors::{Error, Result},
    traits::BrowserOpener,
};

/// Opens URLs in the user's default browser
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemBrowser;

impl BrowserOpener for SystemBrowser {
    fn open(&self, url: &str) -> Result<()> {
        debug!("Opening {url} in the default browser");
        webbrowser::open(url).map_err(|e| Error::BrowserError(format!("{url}: {e}")))
    }
}

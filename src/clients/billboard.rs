use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};

use crate::chart_date::ChartDate;
use crate::clients::{
    entities::ChartEntry,
    errors::{Error, Result},
    traits::ChartSource,
};

/// Weekly Hot 100 chart, one page per week under `<BASE_URL>/<YYYY-MM-DD>`
pub const BASE_URL: &str = "https://www.billboard.com/charts/hot-100";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

// Values that show up in the artist slot of rank-change cells
const PLACEHOLDER_TOKENS: [&str; 3] = ["-", "NEW", "RE-ENTRY"];

const CHART_CONTAINER: &str = ".chart-results-list";
const CHART_ROW: &str = "li.o-chart-results-list__item";
const ARTIST_FIELD: &str = "span";
const TITLE_FIELD: &str = "h3";

pub struct ChartScraper {
    http: Client,
    base_url: String,
}

impl ChartScraper {
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        ChartScraper {
            http,
            base_url: base_url.into(),
        }
    }

    // Scraper pointed at billboard.com with a bounded request time
    pub fn try_default() -> Result<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self::new(http, BASE_URL))
    }

    pub fn chart_url(&self, date: &ChartDate) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), date)
    }

    async fn fetch_page(&self, url: &str) -> Result<String> {
        debug!("GET {url}");
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::FetchError(format!("{url} returned {status}")));
        }
        Ok(response.text().await?)
    }
}

#[async_trait]
impl ChartSource for ChartScraper {
    async fn fetch_entries(&self, date: &ChartDate) -> Result<Vec<ChartEntry>> {
        let url = self.chart_url(date);
        let page = self.fetch_page(&url).await?;
        let entries = parse_entries(&page)?;
        info!("Scraped {} songs from {url}", entries.len());
        Ok(entries)
    }
}

/// Extract the (artist, title) rows of a chart page in rank order.
///
/// Rows whose artist slot holds a rank number or a placeholder token are
/// skipped, as are rows missing either field. Only a page with neither the
/// chart container nor a single chart row is reported as a parse error.
pub fn parse_entries(html: &str) -> Result<Vec<ChartEntry>> {
    let document = Html::parse_document(html);
    let container = selector(CHART_CONTAINER)?;
    let row = selector(CHART_ROW)?;
    let artist = selector(ARTIST_FIELD)?;
    let title = selector(TITLE_FIELD)?;

    let rows: Vec<ElementRef<'_>> = document.select(&row).collect();
    if rows.is_empty() && document.select(&container).next().is_none() {
        return Err(Error::ParseError(
            "page has no chart container and no chart rows".into(),
        ));
    }
    debug!("Found {} chart row items", rows.len());

    Ok(rows
        .into_iter()
        .filter_map(|r| parse_row(r, &artist, &title))
        .collect())
}

fn parse_row(row: ElementRef<'_>, artist: &Selector, title: &Selector) -> Option<ChartEntry> {
    let artist = field_text(row, artist)?;
    if is_rank_marker(&artist) {
        return None;
    }
    let title = field_text(row, title)?;
    Some(ChartEntry { artist, title })
}

// Text of the first matching node, None when the node is missing or blank
fn field_text(row: ElementRef<'_>, field: &Selector) -> Option<String> {
    let node = row.select(field).next()?;
    let text = normalize_ws(&node.text().collect::<String>());
    (!text.is_empty()).then_some(text)
}

fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_rank_marker(artist: &str) -> bool {
    artist.chars().all(char::is_numeric) || PLACEHOLDER_TOKENS.contains(&artist)
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| Error::ParseError(format!("bad selector {css:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHART_FIXTURE: &str = include_str!("../../tests/fixtures/hot100_2024-01-06.html");

    fn pairs(entries: &[ChartEntry]) -> Vec<(&str, &str)> {
        entries
            .iter()
            .map(|e| (e.artist.as_str(), e.title.as_str()))
            .collect()
    }

    #[test]
    fn fixture_yields_songs_in_chart_order() {
        // 4 complete rows; rank cells, 3 placeholder rows and 2 half-filled rows are dropped
        let entries = parse_entries(CHART_FIXTURE).unwrap();
        assert_eq!(
            pairs(&entries),
            vec![
                ("Jack Harlow", "Lovin On Me"),
                ("Tate McRae", "Greedy"),
                ("Brenda Lee", "Rockin' Around The Christmas Tree"),
                ("Zach Bryan Featuring Kacey Musgraves", "I Remember Everything"),
            ]
        );
    }

    #[test]
    fn placeholder_and_rank_artists_are_skipped() {
        let html = r#"<div class="chart-results-list"><ul>
            <li class="o-chart-results-list__item"><h3>One</h3><span>NEW</span></li>
            <li class="o-chart-results-list__item"><h3>Two</h3><span>RE-ENTRY</span></li>
            <li class="o-chart-results-list__item"><h3>Three</h3><span>-</span></li>
            <li class="o-chart-results-list__item"><h3>Four</h3><span>42</span></li>
            <li class="o-chart-results-list__item"><h3>Five</h3><span>NEWJEANS</span></li>
        </ul></div>"#;
        let entries = parse_entries(html).unwrap();
        assert_eq!(pairs(&entries), vec![("NEWJEANS", "Five")]);
    }

    #[test]
    fn fields_are_whitespace_normalized() {
        let html = "<div class=\"chart-results-list\"><ul><li class=\"o-chart-results-list__item\">\
            <h3>\n\t\t\tPaint   The Town\n\tRed\n</h3><span>\n\t Doja Cat \n</span></li></ul></div>";
        let entries = parse_entries(html).unwrap();
        assert_eq!(pairs(&entries), vec![("Doja Cat", "Paint The Town Red")]);
    }

    #[test]
    fn recognised_page_without_rows_is_empty() {
        let html = r#"<html><body><div class="chart-results-list"></div></body></html>"#;
        assert!(parse_entries(html).unwrap().is_empty());
    }

    #[test]
    fn unrecognised_page_is_a_parse_error() {
        let html = "<html><body><h1>Page not found</h1></body></html>";
        assert!(matches!(parse_entries(html), Err(Error::ParseError(_))));
    }

    // Loopback requests must not be routed through a proxy from the environment
    fn local_client() -> Client {
        Client::builder().no_proxy().build().unwrap()
    }

    // Answers a single request with `response` and returns the server's base URL
    async fn serve_once(response: &'static str) -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 2048];
            let _ = socket.read(&mut request).await;
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });
        format!("http://{addr}/charts/hot-100")
    }

    #[tokio::test]
    async fn non_success_status_is_a_fetch_error() {
        let base_url = serve_once(
            "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        )
        .await;
        let scraper = ChartScraper::new(local_client(), base_url);
        let date = ChartDate::parse("2024-01-06").unwrap();

        let result = scraper.fetch_entries(&date).await;

        match result {
            Err(Error::FetchError(msg)) => assert!(msg.contains("404"), "{msg}"),
            other => panic!("expected a fetch error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn successful_page_is_parsed() {
        let base_url = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: 106\r\nConnection: close\r\n\r\n\
             <div class=\"chart-results-list\"><li class=\"o-chart-results-list__item\"><h3>X</h3><span>A</span></li></div>",
        )
        .await;
        let scraper = ChartScraper::new(local_client(), base_url);
        let date = ChartDate::parse("2024-01-06").unwrap();

        let entries = scraper.fetch_entries(&date).await.unwrap();

        assert_eq!(entries, vec![ChartEntry::new("A", "X")]);
    }

    #[tokio::test]
    async fn unreachable_host_is_a_fetch_error() {
        let scraper = ChartScraper::new(local_client(), "http://127.0.0.1:1/charts/hot-100");
        let date = ChartDate::parse("2024-01-06").unwrap();

        assert!(matches!(
            scraper.fetch_entries(&date).await,
            Err(Error::FetchError(_))
        ));
    }

    #[test]
    fn chart_url_appends_date_segment() {
        let scraper = ChartScraper::new(Client::new(), "https://charts.example/hot-100/");
        let date = ChartDate::parse("2024-01-06").unwrap();
        assert_eq!(
            scraper.chart_url(&date),
            "https://charts.example/hot-100/2024-01-06"
        );
    }
}

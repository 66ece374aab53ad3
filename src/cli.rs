use clap::Parser;
use hot100::{ChartDate, ConfigBuilder, PlaylistMaker, clients::errors::Result};
use log::info;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

const DATE_PROMPT: &str = "Date: ('YYYY-MM-DD') ";

#[derive(Parser)]
#[command(name = "hot100-playlist")]
#[command(version, about = "Create a Spotify playlist from a weekly Billboard Hot 100 chart", long_about = None)]
struct Cli {
    /// Chart week as YYYY-MM-DD, asked for interactively when omitted
    date: Option<String>,
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    // A local .env file is optional
    dotenvy::dotenv().ok();

    info!("Building config ...");
    let config = ConfigBuilder::new().build()?;

    let raw = match cli.date {
        Some(date) => date,
        None => prompt_for_date().await?,
    };
    let date = ChartDate::parse(&raw)?;

    let summary = PlaylistMaker::new(config).run(&date).await?;
    info!(
        "Done: {} of {} chart songs added to {}",
        summary.added, summary.attempted, summary.playlist.external_url
    );
    Ok(())
}

async fn prompt_for_date() -> Result<String> {
    let mut stdout = tokio::io::stdout();
    stdout
        .write_all(DATE_PROMPT.as_bytes())
        .await?;
    stdout.flush().await?;

    let mut line = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await?;
    Ok(line)
}

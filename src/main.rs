use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use datalake_upload::{client::DataLakeSdkClient, settings::Settings, uploader::Uploader};
use log::{info, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

/// Upload a local file into an Azure Data Lake directory.
///
/// The account, container, directory and SAS token come from the
/// environment (ACCOUNT_NAME, CONTAINER_NAME, DIRECTORY_NAME, SAS_TOKEN),
/// with a `.env` file honored when present.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Local file to upload, overriding the SOURCE_FILE environment variable
    #[arg(long)]
    source: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    TermLogger::init(
        log_level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .context("failed to initialize logger")?;

    dotenvy::dotenv().ok();

    let mut settings = Settings::from_env().context("incomplete environment")?;
    if let Some(source) = args.source {
        settings = settings.with_source(&source);
    }
    // Reject a nameless source path before touching the network.
    settings.file_name()?;

    info!("connecting to storage account `{}`", settings.account);
    let client = DataLakeSdkClient::new(&settings.account, &settings.sas_token)
        .context("failed to build the service client")?;

    let uploader = Uploader::new(Box::new(client));
    uploader.run(&settings).await?;

    Ok(())
}

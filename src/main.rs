//! X Media Archiver - CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use x_media_archiver::{
    cli::{prompt_account, Args},
    config::{parse_account, parse_since, validate_config, Config},
    download::{download_timeline, DownloadState, Fetchers, HttpImageFetcher, Interrupt, YtDlpFetcher},
    error::{exit_codes, Error, Result},
    fs::AccountPaths,
    output::{
        print_account_stats, print_banner, print_config_summary, print_error, print_info,
        print_success, print_warning,
    },
    record::save_records,
    source::SnscrapeSource,
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(e) => {
            print_error(&format!("{}", e));
            match e {
                Error::Config(_) | Error::ConfigValidation { .. } | Error::MissingConfig(_) => {
                    ExitCode::from(exit_codes::CONFIG_ERROR as u8)
                }
                Error::Source(_) | Error::MalformedPost(_) | Error::ToolNotFound(_) => {
                    ExitCode::from(exit_codes::SOURCE_ERROR as u8)
                }
                _ => ExitCode::from(exit_codes::UNEXPECTED_ERROR as u8),
            }
        }
    }
}

async fn run() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt().with_env_filter(filter).with_target(false).init();

    print_banner();

    // Load configuration
    let config_path = args.config.clone();
    let mut config = if config_path.exists() {
        Config::load(&config_path)?
    } else {
        tracing::debug!("No configuration file at {}", config_path.display());
        Config::default()
    };

    args.merge_into_config(&mut config);

    // Resolve the account, asking for it when neither the file nor the CLI named one
    let raw_account = match config.target.account.take() {
        Some(account) => account,
        None => prompt_account()?,
    };
    let account = parse_account(&raw_account)?;
    config.target.account = Some(account.clone());

    validate_config(&config)?;
    let since = config.target.since.as_deref().map(parse_since).transpose()?;

    let paths = AccountPaths::new(&config.options.download_directory, &account);
    paths.ensure()?;

    print_config_summary(
        &account,
        config.limit(),
        config.target.since.as_deref(),
        &paths.base.display().to_string(),
    );

    // Fetchers
    let images = HttpImageFetcher::new(&config.network)?;
    let videos = YtDlpFetcher::new(&config.video, &config.network.user_agent);
    if !videos.is_available().await {
        print_warning(&format!(
            "{} could not be started; videos and gifs will be skipped",
            config.video.ytdlp_path.display()
        ));
    }
    let fetchers = Fetchers {
        images: &images,
        videos: &videos,
    };

    let interrupt = Interrupt::listen();

    let mut source =
        SnscrapeSource::spawn(&config.source.snscrape_path, &account, since, config.limit())?;

    let limit = config
        .limit()
        .map_or_else(|| "ALL".to_string(), |n| n.to_string());
    print_info(&format!("Scraping @{} (limit={})", account, limit));

    let mut state = DownloadState::new(account, paths);
    let reason = download_timeline(&mut source, &fetchers, &config, &mut state, &interrupt).await;
    tracing::debug!("Run loop stopped: {}", reason);

    save_records(&state.paths, &state.records)?;

    print_account_stats(&state);

    print_success(&format!(
        "Done. Media saved under: {}",
        state.paths.base.display()
    ));

    Ok(())
}

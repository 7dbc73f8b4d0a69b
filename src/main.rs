use anyhow::{Result, bail};
use clap::Parser;
use fb_page_sync::{
    DEFAULT_DATA_DIR, DEFAULT_GRAPH_URL, DEFAULT_PAGE_ID, GraphClient, Resource, SyncConfig,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Mirror a Facebook page's posts, videos and events into JSON files.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(long, env = "FB_PAGE_ID", default_value = DEFAULT_PAGE_ID)]
    page_id: String,

    #[arg(long, env = "FB_ACCESS_TOKEN", hide_env_values = true)]
    access_token: Option<String>,

    #[arg(long, env = "FB_GRAPH_URL", default_value = DEFAULT_GRAPH_URL)]
    graph_url: String,

    #[arg(long, env = "FB_DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .init();

    let cli = Cli::parse();

    let Some(access_token) = cli.access_token.filter(|t| !t.trim().is_empty()) else {
        eprintln!("FB_ACCESS_TOKEN not set");
        std::process::exit(1);
    };

    let config = SyncConfig::new(cli.page_id, access_token)
        .with_graph_url(cli.graph_url)
        .with_data_dir(cli.data_dir);
    let client = GraphClient::new(config)?;

    let pb = ProgressBar::new(Resource::ALL.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos:>2}/{len:2} {msg}")?
            .progress_chars("##-"),
    );

    let mut failed_writes = Vec::new();
    for resource in Resource::ALL {
        pb.set_message(format!("Fetching {}", resource));

        match client.sync(resource).await {
            Ok(report) => pb.suspend(|| {
                if let Some(err) = &report.error {
                    eprintln!("Error fetching {}: {}", resource, err);
                }
                println!("Saved {} items to {}", report.count, report.path.display());
            }),
            Err(err) => {
                pb.suspend(|| eprintln!("Could not save {}: {:#}", resource, err));
                failed_writes.push(resource);
            }
        }

        pb.inc(1);
    }

    pb.finish_and_clear();

    if !failed_writes.is_empty() {
        bail!("{} resource(s) could not be written", failed_writes.len());
    }

    Ok(())
}

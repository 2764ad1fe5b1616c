use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use coursebook::core::catalog::Catalog;
use coursebook::core::config;
use coursebook::server;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

#[derive(Parser)]
#[command(name = "coursebook", about = "Session-scoped markdown course server")]
struct Args {
    /// Base directory of unit subdirectories
    #[arg(short, long)]
    lessons_dir: Option<PathBuf>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to coursebook.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("coursebook.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().map_err(std::io::Error::other)?;
    let config = config::resolve(
        &file_config,
        args.lessons_dir.as_deref().and_then(|p| p.to_str()),
        args.port,
    );

    log::info!("Coursebook starting up, lessons from {}", config.lessons_dir.display());

    // A catalog that fails to load means there is nothing to serve:
    // refuse to start rather than serve an empty course.
    let catalog = match Catalog::load(&config.lessons_dir) {
        Ok(catalog) => catalog,
        Err(e) => {
            log::error!("Failed to load catalog: {}", e);
            eprintln!("coursebook: {e}");
            return Err(std::io::Error::other(e));
        }
    };
    log::info!(
        "Loaded {} units, {} lessons",
        catalog.units().len(),
        catalog.total_lessons()
    );

    let handle = server::start(&config, Arc::new(catalog)).await?;
    println!("coursebook listening on port {}", handle.port);
    handle.wait().await;
    Ok(())
}

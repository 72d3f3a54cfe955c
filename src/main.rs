mod api;
mod app;
mod commands;
mod config;
mod error;
mod event;
mod listing;
mod logging;
mod query;
mod ui;

use app::Section;
use clap::Parser;
use color_eyre::{eyre::eyre, Result};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "djdash")]
#[command(about = "A terminal dashboard for DummyJSON users and products")]
#[command(version)]
struct Args {
  /// Path to config file (default: $XDG_CONFIG_HOME/djdash/config.yaml)
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// Section to open on start
  #[arg(short, long, value_enum, default_value_t = Section::Users)]
  view: Section,

  /// Records per page
  #[arg(long)]
  page_size: Option<u64>,

  /// Log filter, e.g. "debug" or "djdash::listing=trace" (default: $RUST_LOG or djdash=info)
  #[arg(long)]
  log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
  color_eyre::install()?;

  let args = Args::parse();
  let _log_guard = logging::init(args.log_level.as_deref())?;

  let mut config = config::Config::load(args.config.as_deref())?;
  if let Some(page_size) = args.page_size {
    if page_size == 0 {
      return Err(eyre!("--page-size must be at least 1"));
    }
    config.page_size = page_size;
  }

  let mut app = app::App::new(config, args.view)?;
  app.run().await?;

  Ok(())
}

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tango_core::FileStore;
use tango_lang_japanese::JapaneseLineParser;
use tango_ocr::TesseractEngine;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use self::cli::{Cli, Cmd, ProfileCmd};
use self::controller::{AppController, Frontend, Services};
use self::profile::Profiles;
use self::state::AppState;

pub mod cli;
pub mod context;
pub mod controller;
pub mod events;
pub mod profile;
pub mod state;


#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if let Some(Cmd::Profile {
        action: ProfileCmd::New { name },
    }) = &cli.cmd
    {
        init_tracing(false);
        let profiles = Profiles::from_project_dirs()?;
        profiles.init()?;
        let file = profiles.add_from_main(name)?;
        println!("Created {}", file.display());
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => profile::load_config_file(path)?,
        None => {
            let profiles = Profiles::from_project_dirs()?;
            profiles.init()?;
            profiles.load(&cli.profile)?
        }
    };

    init_tracing(config.log_json);
    tracing::info!("Starting tango (profile: {})", cli.profile);

    let frontend = match cli.cmd.and_then(Cmd::into_events) {
        Some(events) => Frontend::Script(events),
        None => Frontend::Shell,
    };

    let data_dir = match &config.storage.data_dir {
        Some(dir) => PathBuf::from(dir),
        None => profile::default_data_dir()?,
    };
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create data dir {}", data_dir.display()))?;
    tracing::info!("Data dir: {}", data_dir.display());

    let services = Services {
        parser: Arc::new(JapaneseLineParser),
        engine: Box::new(TesseractEngine::new(&config.ocr.tesseract_path)),
        backend: Arc::new(FileStore::new(data_dir)),
    };

    let state = Arc::new(AppState::new(config));
    let controller = AppController::new(state).await;

    let tasks = controller.spawn_tasks(services, frontend).await;

    tokio::select! {
        result = controller.run(tasks) => result,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown requested");
            controller.shutdown();
            Ok(())
        }
    }
}

/// Logs go to stderr so they never mix with command output
fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

mod cli;
mod common;
mod config;
mod error;
mod guestbook;
mod network;
mod storage;
mod ui;

use std::error::Error;
use std::sync::Arc;

use clap::Parser;
use dotenvy::dotenv;
use tokio::sync::mpsc;

use cli::{Cli, Command};
use config::AppConfig;
use guestbook::Lister;
use network::{GuestbookClient, HttpRemote};
use ui::GuestbookApp;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    let mut app_config = config::load_config(&cli.config);
    app_config.apply_env();
    if let Some(endpoint) = cli.endpoint {
        app_config.endpoint = endpoint;
    }
    log::debug!("Using endpoint {}", app_config.endpoint);

    match cli.command.unwrap_or(Command::Gui) {
        Command::Gui => run_gui(app_config).await?,
        Command::Post {
            name,
            message,
            optimistic,
        } => cli::run_post(&app_config, name, message, optimistic).await?,
        Command::List {
            password,
            no_cache,
            clear_cache,
        } => cli::run_list(&app_config, password, no_cache, clear_cache).await?,
        Command::InitConfig => cli::run_init_config(&cli.config, &app_config)?,
    }

    Ok(())
}

async fn run_gui(app_config: AppConfig) -> Result<(), Box<dyn Error>> {
    // UI -> Network
    let (cmd_tx, cmd_rx) = mpsc::channel(32);
    // Network -> UI
    let (event_tx, event_rx) = mpsc::channel(32);

    let remote = Arc::new(HttpRemote::new(&app_config.endpoint)?);
    log::info!("Talking to {}", remote.endpoint());
    tokio::spawn(GuestbookClient::new(remote, event_tx, cmd_rx).run());

    let cache = if app_config.cache_enabled {
        cli::open_cache(&app_config.cache_path)
    } else {
        None
    };
    let mut lister = Some(Lister::new(cache));
    let mut event_rx = Some(event_rx);

    eframe::run_native(
        "Guestbook",
        eframe::NativeOptions::default(),
        Box::new(move |cc| {
            let (Some(lister), Some(event_receiver)) = (lister.take(), event_rx.take()) else {
                return Err("Guestbook window initialized twice".into());
            };
            Ok(Box::new(GuestbookApp::new(
                cc,
                &app_config,
                lister,
                cmd_tx.clone(),
                event_receiver,
            )))
        }),
    )?;

    Ok(())
}

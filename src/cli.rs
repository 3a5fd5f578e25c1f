//! Headless commands: post once, print the board once.

use chrono::Utc;
use clap::{Parser, Subcommand};

use crate::common::SendMode;
use crate::config::{self, AppConfig};
use crate::error::GuestbookError;
use crate::guestbook::{
    Board, Lister, PasswordGate, StatusKind, SubmitForm, refresh_via, render_messages, submit_via,
};
use crate::network::{HttpRemote, Remote};
use crate::storage::{self, MessageCache};

#[derive(Parser)]
#[command(
    name = "guestbook",
    version,
    about = "Post to and read a spreadsheet-backed guestbook"
)]
pub struct Cli {
    /// Path to JSON config file
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH, value_name = "FILE")]
    pub config: String,
    /// Remote endpoint URL, overrides the config file and GUESTBOOK_ENDPOINT
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Clone, PartialEq, Eq)]
pub enum Command {
    /// Open the desktop window (default)
    Gui,
    /// Post a message
    Post {
        #[arg(long)]
        name: String,
        #[arg(long)]
        message: String,
        /// Report success without waiting for the endpoint
        #[arg(long)]
        optimistic: bool,
    },
    /// Print the message board, newest first
    List {
        #[arg(long)]
        password: Option<String>,
        /// Neither read nor update the local cache
        #[arg(long)]
        no_cache: bool,
        /// Forget the cached board before fetching
        #[arg(long)]
        clear_cache: bool,
    },
    /// Write the effective configuration to the config path
    InitConfig,
}

pub async fn run_post(
    config: &AppConfig,
    name: String,
    message: String,
    optimistic: bool,
) -> Result<(), GuestbookError> {
    let mode = if optimistic {
        SendMode::Optimistic
    } else {
        config.send_mode
    };
    let remote = HttpRemote::new(&config.endpoint)?;
    let mut form = SubmitForm::new(mode, config.status_hide());
    form.name = name;
    form.message = message;

    submit_via(&mut form, &remote).await;

    match form.status() {
        Some(status) if status.kind == StatusKind::Error => {
            Err(GuestbookError::Application(status.text.clone()))
        }
        Some(status) => {
            println!("{}", status.text);
            Ok(())
        }
        None => Ok(()),
    }
}

pub async fn run_list(
    config: &AppConfig,
    password: Option<String>,
    no_cache: bool,
    clear_cache: bool,
) -> Result<(), GuestbookError> {
    let cache = if config.cache_enabled && !no_cache {
        open_cache(&config.cache_path)
    } else {
        None
    };
    let mut lister = Lister::new(cache);
    if clear_cache {
        lister.clear_cache()?;
        log::info!("Cleared cached messages");
    }

    let remote = HttpRemote::new(&config.endpoint)?;
    list_via(&mut lister, config.password_gate, password, &remote).await?;

    print_board(lister.board());
    Ok(())
}

/// Gate check, cache-first restore and one fetch into `lister`.
///
/// A blank or missing password on a gated board fails before any request.
async fn list_via<R: Remote>(
    lister: &mut Lister,
    gated: bool,
    password: Option<String>,
    remote: &R,
) -> Result<(), GuestbookError> {
    let mut gate = PasswordGate::new(gated || password.is_some());
    match password {
        Some(password) => {
            gate.input = password;
            if gate.attempt().is_none() {
                return Err(gate_error(&gate));
            }
        }
        None if gate.is_required() => {
            return Err(GuestbookError::Application(
                "This board requires --password".to_string(),
            ));
        }
        None => {}
    }
    if !gate.is_required() {
        lister.restore_from_cache();
    }

    let verdict = refresh_via(lister, gate.password(), remote).await;
    gate.record(&verdict);
    if gate.alert().is_some() {
        return Err(gate_error(&gate));
    }
    Ok(())
}

fn gate_error(gate: &PasswordGate) -> GuestbookError {
    GuestbookError::Application(gate.alert().unwrap_or_default().to_string())
}

pub fn run_init_config(path: &str, config: &AppConfig) -> Result<(), GuestbookError> {
    config::save_config(path, config)?;
    println!("Wrote {path}");
    Ok(())
}

/// Open the cache file, or run without one if that fails.
pub fn open_cache(path: &str) -> Option<MessageCache> {
    if let Err(err) = storage::ensure_parent_dir(path) {
        log::warn!("Cannot create cache directory for {path}: {err}");
        return None;
    }
    match MessageCache::with_path(path) {
        Ok(cache) => Some(cache),
        Err(err) => {
            log::warn!("Cannot open message cache {path}: {err}; continuing without it");
            None
        }
    }
}

fn print_board(board: &Board) {
    match board {
        Board::Loading => println!("{}", crate::guestbook::listing::LOADING_TEXT),
        Board::Placeholder(text) => println!("{text}"),
        Board::Messages(messages) => {
            for row in render_messages(messages, Utc::now()) {
                if row.when.is_empty() {
                    println!("{}", row.name);
                } else {
                    println!("{} · {}", row.name, row.when);
                }
                for line in row.text.lines() {
                    println!("    {line}");
                }
                println!();
            }
        }
    }
}

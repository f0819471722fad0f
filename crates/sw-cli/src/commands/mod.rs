pub mod add;
pub mod clear;
pub mod list;
pub mod remove;
pub mod saved;
pub mod settings;
pub mod spin;
pub mod stats;
pub mod tui;

use std::path::PathBuf;

use colored::Colorize;
use sw_core::{
    AlwaysConfirm, Confirm, FileStore, Notice, Severity, WheelConfig, WheelError, WheelResult,
    WheelSession,
};

use crate::prompt::StdinConfirm;

/// Global options shared by every command.
pub struct Context {
    pub data_dir: PathBuf,
    pub seed: Option<u64>,
    pub yes: bool,
}

impl Context {
    pub fn new(data_dir: Option<PathBuf>, seed: Option<u64>, yes: bool) -> Self {
        Self {
            data_dir: data_dir.unwrap_or_else(default_data_dir),
            seed,
            yes,
        }
    }

    /// Open the session stored in the data directory.
    pub fn open(&self) -> Result<WheelSession, String> {
        let mut config = WheelConfig::default();
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        let store = FileStore::new(&self.data_dir);
        WheelSession::open(config, Box::new(store))
            .map_err(|e| format!("cannot read {}: {e}", self.data_dir.display()))
    }

    /// The confirmation gate: `--yes` skips the prompt.
    pub fn confirmer(&self) -> Box<dyn Confirm> {
        if self.yes {
            Box::new(AlwaysConfirm)
        } else {
            Box::new(StdinConfirm)
        }
    }
}

fn default_data_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(|home| PathBuf::from(home).join(".spinwheel"))
        .unwrap_or_else(|| PathBuf::from(".spinwheel"))
}

/// Print queued notices and turn the operation result into the CLI's
/// `Result<_, String>`. A declined prompt is not a failure: it yields
/// `Ok(None)`.
pub fn finish<T>(session: &mut WheelSession, result: WheelResult<T>) -> Result<Option<T>, String> {
    let notices = session.drain_notices();
    let mut error_message = None;
    for notice in &notices {
        if notice.severity == Severity::Error {
            error_message = Some(notice.message.clone());
        } else {
            print_notice(notice);
        }
    }
    match result {
        Ok(value) => Ok(Some(value)),
        Err(WheelError::Cancelled) => {
            println!("  {}", "Cancelled.".dimmed());
            Ok(None)
        }
        Err(e) => Err(error_message.unwrap_or_else(|| e.to_string())),
    }
}

pub fn print_notice(notice: &Notice) {
    let message = match notice.severity {
        Severity::Success => notice.message.green(),
        Severity::Warning => notice.message.yellow(),
        Severity::Error => notice.message.red(),
        Severity::Info => notice.message.normal(),
    };
    println!("  {message}");
}

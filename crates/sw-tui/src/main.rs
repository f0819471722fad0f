//! Standalone TUI binary for Spinwheel.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use sw_core::{FileStore, WheelConfig, WheelSession};

#[derive(Parser)]
#[command(name = "sw-tui", about = "Terminal UI for Spinwheel", version)]
struct Args {
    /// Directory holding the wheel, statistics and saved wheels
    #[arg(long, env = "SW_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Start on a specific tab (wheel, options, stats, saved)
    #[arg(long, default_value = "wheel")]
    tab: String,

    /// RNG seed for reproducible spins
    #[arg(long)]
    seed: Option<u64>,
}

fn main() {
    let args = Args::parse();

    let data_dir = args.data_dir.unwrap_or_else(|| {
        std::env::var_os("HOME")
            .map(|home| PathBuf::from(home).join(".spinwheel"))
            .unwrap_or_else(|| PathBuf::from(".spinwheel"))
    });
    let mut config = WheelConfig::default();
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    let session = match WheelSession::open(config, Box::new(FileStore::new(&data_dir))) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: cannot read {}: {e}", data_dir.display());
            process::exit(1);
        }
    };

    let tab = sw_tui::tabs::TabId::from_name(&args.tab).unwrap_or(sw_tui::tabs::TabId::Wheel);
    let app = sw_tui::app::TuiApp::new(session, tab);

    if let Err(e) = sw_tui::terminal::run(app) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

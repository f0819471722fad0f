//! CLI frontend for the Spinwheel wheel-of-names.

mod commands;
mod prompt;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use commands::Context;

#[derive(Parser)]
#[command(
    name = "sw",
    about = "Spinwheel: spin a wheel of names from the terminal",
    version,
    propagate_version = true
)]
struct Cli {
    /// Directory holding the wheel, statistics and saved wheels
    #[arg(long, global = true, env = "SW_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// RNG seed for reproducible spins
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Answer yes to every confirmation prompt
    #[arg(short, long, global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add options (one per argument, or one per line on stdin with `-`)
    Add {
        /// Option texts
        #[arg(required = true)]
        options: Vec<String>,
    },

    /// Remove options by position (1-based). Several positions are removed
    /// as one bulk removal.
    Remove {
        /// Positions to remove
        #[arg(required = true)]
        positions: Vec<usize>,
    },

    /// List the options on the wheel
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Remove every option
    Clear,

    /// Spin the wheel and print the winner
    Spin {
        /// Animate the spin in real time
        #[arg(short, long)]
        animate: bool,
    },

    /// Show win statistics
    Stats {
        /// Clear all statistics instead
        #[arg(long)]
        clear: bool,
    },

    /// Save the current options under a name
    Save {
        /// Wheel name
        name: String,
    },

    /// Replace the current options with a saved wheel
    Load {
        /// Wheel name
        name: String,
    },

    /// List saved wheels
    Saved,

    /// Delete a saved wheel
    Delete {
        /// Wheel name
        name: String,
    },

    /// Show or change settings
    Settings {
        /// Ask to remove the winner after each spin
        #[arg(long)]
        remove_after_win: Option<bool>,
    },

    /// Launch the interactive terminal UI
    Tui,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let ctx = Context::new(cli.data_dir, cli.seed, cli.yes);
    let result = match cli.command {
        Commands::Add { options } => commands::add::run(&ctx, &options),
        Commands::Remove { positions } => commands::remove::run(&ctx, &positions),
        Commands::List { json } => commands::list::run(&ctx, json),
        Commands::Clear => commands::clear::run(&ctx),
        Commands::Spin { animate } => commands::spin::run(&ctx, animate),
        Commands::Stats { clear } => commands::stats::run(&ctx, clear),
        Commands::Save { name } => commands::saved::save(&ctx, &name),
        Commands::Load { name } => commands::saved::load(&ctx, &name),
        Commands::Saved => commands::saved::list(&ctx),
        Commands::Delete { name } => commands::saved::delete(&ctx, &name),
        Commands::Settings { remove_after_win } => commands::settings::run(&ctx, remove_after_win),
        Commands::Tui => commands::tui::run(&ctx),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

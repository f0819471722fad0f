//! Launch the sw-tui standalone binary.

use super::Context;

/// Launch the sw-tui binary on the same data directory.
pub fn run(ctx: &Context) -> Result<(), String> {
    let mut command = std::process::Command::new("sw-tui");
    command.arg("--data-dir").arg(&ctx.data_dir);
    if let Some(seed) = ctx.seed {
        command.arg("--seed").arg(seed.to_string());
    }

    match command.status() {
        Ok(s) if s.success() => Ok(()),
        Ok(s) => Err(format!("sw-tui exited with {s}")),
        Err(_) => {
            Err("sw-tui binary not found. Install with: cargo install --path crates/sw-tui".into())
        }
    }
}

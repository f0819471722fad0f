use std::io::{self, Write};
use std::thread;
use std::time::{Duration, Instant};

use colored::Colorize;
use sw_core::WheelSession;
use sw_core::resolver::resolve;

use super::{Context, finish};

/// Frame interval for both the synthetic and the real clock.
const FRAME_MS: u64 = 16;

pub fn run(ctx: &Context, animate: bool) -> Result<(), String> {
    let mut session = ctx.open()?;
    let result = session.spin(0);
    finish(&mut session, result)?;

    if animate {
        run_animated(&mut session)?;
    } else {
        run_synthetic(&mut session)?;
    }

    let Some(winner) = session.last_winner().cloned() else {
        return Err("the spin did not settle".into());
    };
    let wins = session.statistics().count(&winner.text);
    println!(
        "  {} {}",
        winner.text.bold(),
        format!("({wins} win{})", if wins == 1 { "" } else { "s" }).dimmed()
    );

    if session.pending_winner().is_some() {
        let question = format!("Remove \"{}\" from the wheel?", winner.text);
        let mut confirm = ctx.confirmer();
        if confirm.confirm(&question) {
            let result = session.remove_winner();
            finish(&mut session, result)?;
        } else {
            let result = session.keep_winner();
            finish(&mut session, result)?;
        }
    }
    Ok(())
}

/// Drive the spin with a synthetic clock: instant, same frames as real time.
fn run_synthetic(session: &mut WheelSession) -> Result<(), String> {
    let mut now = 0;
    loop {
        now += FRAME_MS;
        let result = session.tick(now);
        if finish(session, result)?.is_some_and(|step| step.resolved.is_some()) {
            return Ok(());
        }
    }
}

/// Drive the spin in real time, showing the option under the pointer.
fn run_animated(session: &mut WheelSession) -> Result<(), String> {
    let started = Instant::now();
    let count = session.wheel().len();
    loop {
        thread::sleep(Duration::from_millis(FRAME_MS));
        let now = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        let step = session.tick(now).map_err(|e| e.to_string())?;
        if let Some(resolution) = step.resolved {
            if let Some(option) = session.wheel().get(resolution.index) {
                print!("\r  > {:<40}", option.text);
            }
            println!();
            let notices = session.drain_notices();
            for notice in &notices {
                super::print_notice(notice);
            }
            return Ok(());
        }
        let under_pointer = resolve(step.angle, count).map_err(|e| e.to_string())?;
        if let Some(option) = session.wheel().get(under_pointer) {
            print!("\r  > {:<40}", option.text);
            io::stdout().flush().map_err(|e| e.to_string())?;
        }
    }
}

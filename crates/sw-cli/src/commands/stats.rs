use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use super::{Context, finish};

pub fn run(ctx: &Context, clear: bool) -> Result<(), String> {
    let mut session = ctx.open()?;

    if clear {
        let mut confirm = ctx.confirmer();
        let result = session.clear_statistics(confirm.as_mut());
        finish(&mut session, result)?;
        return Ok(());
    }

    let stats = session.statistics();
    if stats.is_empty() {
        println!("  No spins yet.");
        return Ok(());
    }

    let total = stats.total();
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Option", "Wins", "Share"]);
    for (text, count) in stats.sorted() {
        let share = f64::from(count) * 100.0 / total as f64;
        table.add_row(vec![
            text.to_string(),
            count.to_string(),
            format!("{share:.1}%"),
        ]);
    }

    println!("  {}", "Statistics".bold().underline());
    println!();
    println!("{table}");
    println!();
    println!("  {total} spins, {} distinct winners", stats.len());
    Ok(())
}

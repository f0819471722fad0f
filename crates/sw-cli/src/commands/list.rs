use comfy_table::{ContentArrangement, Table};

use super::Context;

pub fn run(ctx: &Context, json: bool) -> Result<(), String> {
    let session = ctx.open()?;
    let options = session.options();

    if json {
        let text = serde_json::to_string_pretty(options)
            .map_err(|e| format!("cannot encode options: {e}"))?;
        println!("{text}");
        return Ok(());
    }

    if options.is_empty() {
        println!("  No options on the wheel.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Option", "Color", "Wins"]);
    for (i, option) in options.iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            option.text.clone(),
            option.color.clone(),
            session.statistics().count(&option.text).to_string(),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} options", options.len());
    Ok(())
}

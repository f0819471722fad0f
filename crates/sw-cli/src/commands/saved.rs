use comfy_table::{ContentArrangement, Table};

use super::{Context, finish};

pub fn save(ctx: &Context, name: &str) -> Result<(), String> {
    let mut session = ctx.open()?;
    let mut confirm = ctx.confirmer();
    let result = session.save_wheel(name, confirm.as_mut());
    finish(&mut session, result)?;
    Ok(())
}

pub fn load(ctx: &Context, name: &str) -> Result<(), String> {
    let mut session = ctx.open()?;
    let result = session.load_wheel(name);
    finish(&mut session, result)?;
    Ok(())
}

pub fn delete(ctx: &Context, name: &str) -> Result<(), String> {
    let mut session = ctx.open()?;
    let mut confirm = ctx.confirmer();
    let result = session.delete_wheel(name, confirm.as_mut());
    finish(&mut session, result)?;
    Ok(())
}

pub fn list(ctx: &Context) -> Result<(), String> {
    let session = ctx.open()?;
    let wheels = session
        .saved_wheels()
        .map_err(|e| format!("cannot read saved wheels: {e}"))?;

    if wheels.is_empty() {
        println!("  No saved wheels.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "Options", "Saved"]);
    for (name, wheel) in &wheels {
        table.add_row(vec![
            name.clone(),
            wheel.options.len().to_string(),
            wheel.saved_at.format("%Y-%m-%d %H:%M").to_string(),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} saved wheels", wheels.len());
    Ok(())
}

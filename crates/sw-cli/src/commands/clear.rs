use super::{Context, finish};

pub fn run(ctx: &Context) -> Result<(), String> {
    let mut session = ctx.open()?;
    if session.wheel().is_empty() {
        println!("  The wheel is already empty.");
        return Ok(());
    }
    let mut confirm = ctx.confirmer();
    let result = session.clear_all(confirm.as_mut());
    finish(&mut session, result)?;
    Ok(())
}

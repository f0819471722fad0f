use super::{Context, finish};

pub fn run(ctx: &Context, remove_after_win: Option<bool>) -> Result<(), String> {
    let mut session = ctx.open()?;
    if let Some(enabled) = remove_after_win {
        session.set_remove_after_win(enabled);
        finish(&mut session, Ok(()))?;
        return Ok(());
    }

    let settings = session.settings();
    println!("  remove-after-win: {}", settings.remove_after_win);
    Ok(())
}

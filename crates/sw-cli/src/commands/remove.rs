use std::collections::BTreeSet;

use super::{Context, finish};

/// Remove options by 1-based position. One position is a plain removal,
/// several go through bulk selection so the minimum-count rule applies.
pub fn run(ctx: &Context, positions: &[usize]) -> Result<(), String> {
    let mut session = ctx.open()?;
    let count = session.wheel().len();
    let mut indices = BTreeSet::new();
    for &position in positions {
        if position == 0 || position > count {
            return Err(format!("no option at position {position}"));
        }
        indices.insert(position - 1);
    }

    if indices.len() == 1 {
        let index = positions[0] - 1;
        let result = session.remove_option(index);
        if let Some(removed) = finish(&mut session, result)? {
            println!("  Removed \"{}\"", removed.text);
        }
        return Ok(());
    }

    session
        .toggle_selection_mode()
        .map_err(|e| e.to_string())?;
    for index in indices {
        session.toggle_selected(index).map_err(|e| e.to_string())?;
    }
    session.drain_notices();
    let mut confirm = ctx.confirmer();
    let result = session.remove_selected(confirm.as_mut());
    finish(&mut session, result)?;
    Ok(())
}

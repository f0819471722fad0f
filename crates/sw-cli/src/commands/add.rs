use std::io::{self, Read};

use super::{Context, finish};

pub fn run(ctx: &Context, options: &[String]) -> Result<(), String> {
    let input = if options.len() == 1 && options[0] == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| format!("cannot read stdin: {e}"))?;
        buf
    } else {
        options.join("\n")
    };

    let mut session = ctx.open()?;
    let result = session.add_options(&input);
    finish(&mut session, result)?;
    println!(
        "  {} of {} options on the wheel",
        session.wheel().len(),
        session.wheel().max_options()
    );
    Ok(())
}

use anyhow::{Context, Result, bail};
use memefield_core::{PointerEvent, ScreenPos};

pub(crate) const USAGE: &str = "commands: r <x> <y> to reveal, f <x> <y> to flag, q to quit";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    Pointer(PointerEvent),
    Quit,
}

fn parse_pos<'a>(mut args: impl Iterator<Item = &'a str>) -> Result<ScreenPos> {
    let (Some(x), Some(y), None) = (args.next(), args.next(), args.next()) else {
        bail!("expected two coordinates");
    };
    let x = x.parse().with_context(|| format!("bad column {x:?}"))?;
    let y = y.parse().with_context(|| format!("bad row {y:?}"))?;
    Ok(ScreenPos::new(x, y))
}

/// Reads one line of player input, positions are in screen space (column, row).
pub(crate) fn parse(line: &str) -> Result<Command> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        bail!("empty command");
    };
    Ok(match verb.to_ascii_lowercase().as_str() {
        "r" | "reveal" => Command::Pointer(PointerEvent::reveal(parse_pos(words)?)),
        "f" | "flag" => Command::Pointer(PointerEvent::flag(parse_pos(words)?)),
        "q" | "quit" | "exit" => Command::Quit,
        other => bail!("unknown command {other:?}"),
    })
}

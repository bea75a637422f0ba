use tessera_core::{Direction, Fling};
use thiserror::Error;

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Command {
    Swipe(Direction),
    Fling(Fling),
    NewGame,
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub(crate) enum InputError {
    #[error("Unknown command {0:?}, type `help` for the list")]
    UnknownCommand(String),
    #[error("fling takes 6 numbers: X0 Y0 X1 Y1 VX VY")]
    BadFling,
}

/// Parses one input line, `Ok(None)` for blank lines.
pub(crate) fn parse_line(line: &str) -> Result<Option<Command>, InputError> {
    use Direction::*;

    let mut words = line.split_whitespace();
    let Some(word) = words.next() else {
        return Ok(None);
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "w" | "k" | "up" => Command::Swipe(Up),
        "s" | "j" | "down" => Command::Swipe(Down),
        "a" | "h" | "left" => Command::Swipe(Left),
        "d" | "l" | "right" => Command::Swipe(Right),
        "fling" => Command::Fling(parse_fling(words)?),
        "n" | "new" => Command::NewGame,
        "?" | "help" => Command::Help,
        "q" | "quit" | "exit" => Command::Quit,
        _ => return Err(InputError::UnknownCommand(word.to_string())),
    };
    Ok(Some(command))
}

fn parse_fling<'a>(words: impl Iterator<Item = &'a str>) -> Result<Fling, InputError> {
    let numbers = words
        .map(str::parse::<f32>)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| InputError::BadFling)?;

    match numbers[..] {
        [x0, y0, x1, y1, vx, vy] => Ok(Fling::new((x0, y0), (x1, y1), (vx, vy))),
        _ => Err(InputError::BadFling),
    }
}

pub(crate) const HELP: &str = "\
w/k/up     swipe up
s/j/down   swipe down
a/h/left   swipe left
d/l/right  swipe right
fling X0 Y0 X1 Y1 VX VY
           classify a raw fling and swipe if it qualifies
n/new      start over
q/quit     leave
";
